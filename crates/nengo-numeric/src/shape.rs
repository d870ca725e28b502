// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shape specifications and broadcasting rules

use std::fmt;

use crate::error::{NumericError, NumericResult};

/// Canonical shape: one non-negative extent per dimension
pub type Shape = Vec<usize>;

/// Loosely typed shape argument as a caller might supply it
///
/// Only `Int` and `Sequence`s of non-negative `Int`s describe a shape;
/// the other variants exist so that bad input can be reported instead of
/// being ruled out by the type system.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeValue {
    Int(i128),
    Float(f64),
    Text(String),
    Sequence(Vec<ShapeValue>),
}

impl fmt::Display for ShapeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeValue::Int(v) => write!(f, "{}", v),
            ShapeValue::Float(v) => write!(f, "{:?}", v),
            ShapeValue::Text(v) => write!(f, "'{}'", v),
            ShapeValue::Sequence(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

macro_rules! shape_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ShapeValue {
                fn from(value: $ty) -> Self {
                    // lossless for every listed width
                    ShapeValue::Int(value as i128)
                }
            }
        )*
    };
}

shape_value_from_int!(i32, i64, u32, u64, usize);

impl From<f64> for ShapeValue {
    fn from(value: f64) -> Self {
        ShapeValue::Float(value)
    }
}

impl From<&str> for ShapeValue {
    fn from(value: &str) -> Self {
        ShapeValue::Text(value.to_string())
    }
}

impl<T: Into<ShapeValue>> From<Vec<T>> for ShapeValue {
    fn from(values: Vec<T>) -> Self {
        ShapeValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl From<&[usize]> for ShapeValue {
    fn from(values: &[usize]) -> Self {
        ShapeValue::Sequence(values.iter().map(|&v| ShapeValue::from(v)).collect())
    }
}

fn conversion_error(value: &ShapeValue) -> NumericError {
    NumericError::value(format!("{} cannot be safely converted to a shape", value))
}

fn as_extent(value: &ShapeValue, whole: &ShapeValue) -> NumericResult<usize> {
    match value {
        ShapeValue::Int(v) => usize::try_from(*v).map_err(|_| conversion_error(whole)),
        _ => Err(conversion_error(whole)),
    }
}

/// Convert an integer or a sequence of integers to a shape
///
/// # Errors
/// Value error for floats (even integral ones), text, nested sequences and
/// negative extents.
///
/// # Example
/// ```
/// use nengo_numeric::as_shape;
///
/// assert_eq!(as_shape(3).unwrap(), vec![3]);
/// assert_eq!(as_shape(vec![2, 4]).unwrap(), vec![2, 4]);
/// assert!(as_shape(1.0).is_err());
/// ```
pub fn as_shape(value: impl Into<ShapeValue>) -> NumericResult<Shape> {
    let value = value.into();
    match &value {
        ShapeValue::Int(_) => Ok(vec![as_extent(&value, &value)?]),
        ShapeValue::Sequence(items) => items.iter().map(|item| as_extent(item, &value)).collect(),
        _ => Err(conversion_error(&value)),
    }
}

/// [`as_shape`], then left-pad with ones to at least `min_dim` dimensions
pub fn as_shape_min(value: impl Into<ShapeValue>, min_dim: usize) -> NumericResult<Shape> {
    let shape = as_shape(value)?;
    Ok(broadcast_shape(&shape, min_dim))
}

/// Left-pad `shape` with singleton dimensions up to rank `length`
///
/// Shapes already of rank `length` or more are returned unchanged.
///
/// # Example
/// ```
/// use nengo_numeric::broadcast_shape;
///
/// assert_eq!(broadcast_shape(&[3, 2], 4), vec![1, 1, 3, 2]);
/// assert_eq!(broadcast_shape(&[3, 2], 1), vec![3, 2]);
/// ```
pub fn broadcast_shape(shape: &[usize], length: usize) -> Shape {
    let padding = length.saturating_sub(shape.len());
    let mut padded = vec![1; padding];
    padded.extend_from_slice(shape);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_as_shape_int_and_sequence() {
        assert_eq!(as_shape(5).unwrap(), vec![5]);
        assert_eq!(as_shape(0usize).unwrap(), vec![0]);
        assert_eq!(as_shape(vec![3, 1, 2]).unwrap(), vec![3, 1, 2]);
        assert_eq!(as_shape(Vec::<i64>::new()).unwrap(), Vec::<usize>::new());
        assert_eq!(as_shape(&[4usize, 4][..]).unwrap(), vec![4, 4]);
    }

    #[test]
    fn test_as_shape_errors() {
        let err = as_shape(1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(err.to_string(), "1.0 cannot be safely converted to a shape");

        for bad in [
            ShapeValue::from("abc"),
            ShapeValue::from(-1),
            ShapeValue::from(vec![2, -3]),
            ShapeValue::Sequence(vec![ShapeValue::from(2), ShapeValue::from(2.5)]),
            ShapeValue::Sequence(vec![ShapeValue::from(vec![1, 2])]),
        ] {
            let err = as_shape(bad).unwrap_err();
            assert!(err.to_string().contains("cannot be safely converted to a shape"));
        }
    }

    #[test]
    fn test_extents_beyond_usize_rejected() {
        assert_eq!(as_shape(u64::MAX).ok(), usize::try_from(u64::MAX).ok().map(|v| vec![v]));
        assert_eq!(as_shape(usize::MAX).unwrap(), vec![usize::MAX]);

        let too_big = ShapeValue::Int(i128::from(u64::MAX) + 1);
        let err = as_shape(too_big).unwrap_err();
        assert_eq!(err.to_string(), "18446744073709551616 cannot be safely converted to a shape");
    }

    #[test]
    fn test_error_message_shows_whole_value() {
        let err = as_shape(vec![2, -3]).unwrap_err();
        assert!(err.to_string().starts_with("(2, -3)"));
    }

    #[test]
    fn test_as_shape_min() {
        assert_eq!(as_shape_min(3, 3).unwrap(), vec![1, 1, 3]);
        assert_eq!(as_shape_min(vec![2, 2], 1).unwrap(), vec![2, 2]);
    }

    #[test]
    fn test_broadcast_shape() {
        assert_eq!(broadcast_shape(&[3, 2], 3), vec![1, 3, 2]);
        assert_eq!(broadcast_shape(&[3, 2], 4), vec![1, 1, 3, 2]);
        assert_eq!(broadcast_shape(&[3, 2], 2), vec![3, 2]);
        assert_eq!(broadcast_shape(&[], 2), vec![1, 1]);
    }
}
