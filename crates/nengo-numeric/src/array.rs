// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Canonical array conversion with rank control and read-only buffers

use ndarray::{arr0, Array, Array1, ArrayD, ArrayView, ArrayViewD, ArrayViewMutD, Axis, Dimension, IxDyn};

use crate::error::{NumericError, NumericResult};

const READ_ONLY_MESSAGE: &str = "assignment destination is read-only";

/// Values that [`array`] accepts
pub trait IntoArrayLike<A> {
    fn into_array_like(self) -> ArrayD<A>;
}

impl<A, D: Dimension> IntoArrayLike<A> for Array<A, D> {
    fn into_array_like(self) -> ArrayD<A> {
        self.into_dyn()
    }
}

impl<'a, A: Clone, D: Dimension> IntoArrayLike<A> for ArrayView<'a, A, D> {
    fn into_array_like(self) -> ArrayD<A> {
        self.to_owned().into_dyn()
    }
}

impl<A> IntoArrayLike<A> for Vec<A> {
    fn into_array_like(self) -> ArrayD<A> {
        Array1::from(self).into_dyn()
    }
}

impl<A, const N: usize> IntoArrayLike<A> for [A; N] {
    fn into_array_like(self) -> ArrayD<A> {
        Array1::from(Vec::from(self)).into_dyn()
    }
}

impl<A: Clone> IntoArrayLike<A> for &[A] {
    fn into_array_like(self) -> ArrayD<A> {
        Array1::from(self.to_vec()).into_dyn()
    }
}

impl<A> IntoArrayLike<A> for NdBuffer<A> {
    fn into_array_like(self) -> ArrayD<A> {
        self.data
    }
}

/// Rank and mutability requested from [`array`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayOptions {
    /// Exact rank of the result; takes precedence over `min_dims`
    pub dims: Option<usize>,
    /// Minimum rank of the result when `dims` is not set
    pub min_dims: usize,
    pub readonly: bool,
}

impl ArrayOptions {
    pub fn dims(dims: usize) -> Self {
        ArrayOptions {
            dims: Some(dims),
            ..Default::default()
        }
    }

    pub fn min_dims(min_dims: usize) -> Self {
        ArrayOptions {
            min_dims,
            ..Default::default()
        }
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// Owned N-dimensional buffer with an optional write lock
///
/// The shape is fixed for the lifetime of the buffer. A read-only buffer
/// rejects every mutation with a value error; the flag can be set but
/// never cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct NdBuffer<A> {
    data: ArrayD<A>,
    readonly: bool,
}

impl<A> NdBuffer<A> {
    /// Zero-dimensional buffer holding one value
    pub fn scalar(value: A) -> Self {
        NdBuffer {
            data: arr0(value).into_dyn(),
            readonly: false,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Freeze the buffer
    pub fn set_readonly(&mut self) {
        self.readonly = true;
    }

    pub fn as_array(&self) -> &ArrayD<A> {
        &self.data
    }

    pub fn view(&self) -> ArrayViewD<'_, A> {
        self.data.view()
    }

    pub fn get(&self, index: &[usize]) -> Option<&A> {
        if index.len() != self.ndim() {
            return None;
        }
        self.data.get(IxDyn(index))
    }

    fn check_writeable(&self) -> NumericResult<()> {
        if self.readonly {
            Err(NumericError::value(READ_ONLY_MESSAGE))
        } else {
            Ok(())
        }
    }

    /// Mutable view; fails on a read-only buffer
    pub fn view_mut(&mut self) -> NumericResult<ArrayViewMutD<'_, A>> {
        self.check_writeable()?;
        Ok(self.data.view_mut())
    }

    /// Assign one element
    ///
    /// # Errors
    /// Value error if the buffer is read-only or `index` is out of bounds.
    pub fn set(&mut self, index: &[usize], value: A) -> NumericResult<()> {
        self.check_writeable()?;
        let shape = self.data.shape().to_vec();
        let slot = if index.len() == shape.len() {
            self.data.get_mut(IxDyn(index))
        } else {
            None
        };
        match slot {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(NumericError::value(format!(
                "index {:?} is out of bounds for shape {:?}",
                index, shape
            ))),
        }
    }

    pub fn fill(&mut self, value: A) -> NumericResult<()>
    where
        A: Clone,
    {
        self.check_writeable()?;
        self.data.fill(value);
        Ok(())
    }

    pub fn into_inner(self) -> ArrayD<A> {
        self.data
    }
}

/// Convert `value` to a canonical array
///
/// With `options.dims`, the result has exactly that rank; otherwise at least
/// `options.min_dims`. Missing dimensions are appended as trailing
/// singletons, so a length-3 vector asked for 3 dimensions becomes `[3, 1, 1]`.
///
/// # Errors
/// Validation error on `dims` when the input already has more dimensions
/// than requested; dimensions are never dropped.
///
/// # Example
/// ```
/// use nengo_numeric::{array, ArrayOptions};
///
/// let x = array(vec![1, 2, 3], ArrayOptions::dims(4)).unwrap();
/// assert_eq!(x.shape(), &[3, 1, 1, 1]);
///
/// let mut frozen = array(vec![1, 2, 3], ArrayOptions::default().readonly()).unwrap();
/// assert!(frozen.set(&[0], 3).is_err());
/// ```
pub fn array<A, T: IntoArrayLike<A>>(value: T, options: ArrayOptions) -> NumericResult<NdBuffer<A>> {
    let mut data = value.into_array_like();
    let ndim = data.ndim();

    let target = match options.dims {
        Some(dims) if ndim > dims => {
            return Err(NumericError::validation(
                "dims",
                format!("Input cannot be cast to array with {} dimensions", dims),
            ));
        }
        Some(dims) => dims,
        None => ndim.max(options.min_dims),
    };

    for axis in ndim..target {
        data = data.insert_axis(Axis(axis));
    }

    Ok(NdBuffer {
        data,
        readonly: options.readonly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ndarray::{array as nd, ShapeBuilder};

    #[test]
    fn test_dims_appends_trailing_axes() {
        assert_eq!(array(vec![1, 2, 3], ArrayOptions::dims(4)).unwrap().shape(), &[3, 1, 1, 1]);
        assert_eq!(array(vec![1, 2, 3], ArrayOptions::dims(1)).unwrap().shape(), &[3]);
    }

    #[test]
    fn test_min_dims() {
        assert_eq!(array(vec![1, 2, 3], ArrayOptions::min_dims(2)).unwrap().shape(), &[3, 1]);
        assert_eq!(array(vec![1, 2, 3], ArrayOptions::min_dims(1)).unwrap().shape(), &[3]);
        assert_eq!(array(nd![[1, 2], [3, 4]], ArrayOptions::min_dims(1)).unwrap().shape(), &[2, 2]);
    }

    #[test]
    fn test_dims_takes_precedence_over_min_dims() {
        let options = ArrayOptions {
            dims: Some(2),
            min_dims: 4,
            readonly: false,
        };
        assert_eq!(array([1.0, 2.0], options).unwrap().shape(), &[2, 1]);
    }

    #[test]
    fn test_cannot_drop_dimensions() {
        let err = array(nd![[1, 2, 3]], ArrayOptions::dims(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("Input cannot be cast to array"));
    }

    #[test]
    fn test_readonly_rejects_mutation() {
        let mut x = array(vec![1, 2, 3], ArrayOptions::default().readonly()).unwrap();
        let err = x.set(&[0], 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert!(err.to_string().contains("read-only"));
        assert!(x.view_mut().is_err());
        assert!(x.fill(0).is_err());
        assert_eq!(x.get(&[0]), Some(&1));
    }

    #[test]
    fn test_mutable_by_default() {
        let mut x = array(vec![1, 2, 3], ArrayOptions::default()).unwrap();
        x.set(&[0], 3).unwrap();
        let mut view = x.view_mut().unwrap();
        view[&[2][..]] = 7;
        drop(view);
        assert_eq!(x.into_inner().into_raw_vec_and_offset().0, vec![3, 2, 7]);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut x = array(vec![1, 2, 3], ArrayOptions::dims(2)).unwrap();
        assert!(x.set(&[3, 0], 1).is_err());
        assert!(x.set(&[0], 1).is_err());
        x.set(&[2, 0], 9).unwrap();
        assert_eq!(x.get(&[2, 0]), Some(&9));
    }

    #[test]
    fn test_freeze_is_one_way() {
        let mut x = array(vec![0u8; 4], ArrayOptions::default()).unwrap();
        x.set_readonly();
        assert!(x.is_readonly());
        let y = array(x, ArrayOptions::default()).unwrap();
        assert!(!y.is_readonly());
    }

    #[test]
    fn test_scalar_and_fortran_input() {
        let s = array(NdBuffer::scalar(4.5), ArrayOptions::min_dims(2)).unwrap();
        assert_eq!(s.shape(), &[1, 1]);

        let f = ndarray::Array::from_shape_vec((2, 3).f(), vec![1, 2, 3, 4, 5, 6]).unwrap();
        let x = array(f.clone(), ArrayOptions::dims(3)).unwrap();
        assert_eq!(x.shape(), &[2, 3, 1]);
        assert_eq!(x.get(&[1, 0, 0]), f.get((1, 0)));
    }
}
