// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Element types with a stable dtype tag

/// Plain numeric element with a dtype tag
///
/// The tag takes part in structural hashing, so arrays holding the same
/// bytes under different element types hash differently.
pub trait Element: bytemuck::Pod + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    const DTYPE: &'static str;
}

macro_rules! impl_element {
    ($($ty:ty => $tag:literal),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: &'static str = $tag;
            }
        )*
    };
}

impl_element!(
    f32 => "f32",
    f64 => "f64",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
);
