// src/tensor/mod.rs

use std::fmt;
use std::sync::Arc;

use crate::buffer::CpuBuffer;
use crate::error::ZeroGradError;
use crate::types::DType;

pub mod create;
pub(crate) mod utils;

// Re-export creation functions to make them public
pub use create::{
    from_vec_f32, from_vec_f64, full, full_f32, ones, ones_f32, ones_like, rand, randn, scalar,
    scalar_f32, zeros, zeros_f32, zeros_like,
};

use utils::{map_slice, zip_slice};

/// A dense, row-major, CPU-only numeric container.
///
/// `Tensor` is the raw-data side of the engine: it carries no gradient and
/// no graph linkage (those live on [`crate::variable::Variable`]). Clones
/// are cheap, since the element buffer is shared behind an `Arc`.
///
/// All elementwise operations are shape-preserving and require both
/// operands to have the same shape and the same element kind.
#[derive(Clone)]
pub struct Tensor {
    pub(crate) buffer: Arc<CpuBuffer>,
    pub(crate) dtype: DType,
    pub(crate) shape: Vec<usize>,
}

impl Tensor {
    /// Creates a new f64 tensor with the given data and shape.
    ///
    /// This is the primary constructor. The data vector is interpreted in
    /// flattened row-major order; its length must equal the product of the
    /// shape, otherwise `TensorCreationError` is returned.
    pub fn new(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, ZeroGradError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(ZeroGradError::TensorCreationError { data_len, shape });
        }
        Ok(Tensor {
            buffer: Arc::new(CpuBuffer::F64(Arc::new(data_vec))),
            dtype: DType::F64,
            shape,
        })
    }

    /// Creates a new f32 tensor with the given data and shape.
    ///
    /// Same validation as [`Tensor::new`].
    pub fn new_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, ZeroGradError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(ZeroGradError::TensorCreationError { data_len, shape });
        }
        Ok(Tensor {
            buffer: Arc::new(CpuBuffer::F32(Arc::new(data_vec))),
            dtype: DType::F32,
            shape,
        })
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    /// Returns the number of elements in the tensor.
    ///
    /// A 0-dimensional (scalar) tensor has one element.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Attempts to get the tensor data as a `Vec<f32>`.
    /// Returns an error if the tensor is not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, ZeroGradError> {
        let buffer_arc = self.buffer.try_get_f32()?;
        Ok(buffer_arc.as_ref().clone())
    }

    /// Attempts to get the tensor data as a `Vec<f64>`.
    /// Returns an error if the tensor is not F64.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, ZeroGradError> {
        let buffer_arc = self.buffer.try_get_f64()?;
        Ok(buffer_arc.as_ref().clone())
    }

    /// Applies an elementwise unary operation, dispatching on the element
    /// kind. The output has the same shape and dtype as the input.
    pub(crate) fn unary_map<F32Op, F64Op>(
        &self,
        op_f32: F32Op,
        op_f64: F64Op,
    ) -> Result<Tensor, ZeroGradError>
    where
        F32Op: Fn(f32) -> f32,
        F64Op: Fn(f64) -> f64,
    {
        let buffer = match &*self.buffer {
            CpuBuffer::F32(data) => CpuBuffer::F32(Arc::new(map_slice(data.as_slice(), op_f32))),
            CpuBuffer::F64(data) => CpuBuffer::F64(Arc::new(map_slice(data.as_slice(), op_f64))),
        };
        Ok(Tensor {
            buffer: Arc::new(buffer),
            dtype: self.dtype,
            shape: self.shape.clone(),
        })
    }

    /// Applies an elementwise binary operation, dispatching on the element
    /// kind. Both operands must have the same shape and dtype.
    pub(crate) fn binary_zip<F32Op, F64Op>(
        &self,
        other: &Tensor,
        op_f32: F32Op,
        op_f64: F64Op,
        op_name: &str,
    ) -> Result<Tensor, ZeroGradError>
    where
        F32Op: Fn(f32, f32) -> f32,
        F64Op: Fn(f64, f64) -> f64,
    {
        if self.dtype != other.dtype {
            return Err(ZeroGradError::DTypeMismatch {
                expected: self.dtype,
                actual: other.dtype,
                operation: op_name.to_string(),
            });
        }
        if self.shape != other.shape {
            return Err(ZeroGradError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
                operation: op_name.to_string(),
            });
        }
        let buffer = match (&*self.buffer, &*other.buffer) {
            (CpuBuffer::F32(a), CpuBuffer::F32(b)) => {
                CpuBuffer::F32(Arc::new(zip_slice(a.as_slice(), b.as_slice(), op_f32)))
            }
            (CpuBuffer::F64(a), CpuBuffer::F64(b)) => {
                CpuBuffer::F64(Arc::new(zip_slice(a.as_slice(), b.as_slice(), op_f64)))
            }
            _ => {
                // dtype fields matched above, so the buffers must agree
                return Err(ZeroGradError::InternalError(format!(
                    "buffer kind disagrees with dtype in {}",
                    op_name
                )));
            }
        };
        Ok(Tensor {
            buffer: Arc::new(buffer),
            dtype: self.dtype,
            shape: self.shape.clone(),
        })
    }

    /// Elementwise addition.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, ZeroGradError> {
        self.binary_zip(other, |a, b| a + b, |a, b| a + b, "add")
    }

    /// Elementwise subtraction.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor, ZeroGradError> {
        self.binary_zip(other, |a, b| a - b, |a, b| a - b, "sub")
    }

    /// Elementwise multiplication.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, ZeroGradError> {
        self.binary_zip(other, |a, b| a * b, |a, b| a * b, "mul")
    }

    /// Multiplies every element by a scalar factor.
    pub fn scale(&self, factor: f64) -> Result<Tensor, ZeroGradError> {
        self.unary_map(|v| v * factor as f32, |v| v * factor)
    }

    /// Adds a scalar offset to every element.
    pub fn add_scalar(&self, offset: f64) -> Result<Tensor, ZeroGradError> {
        self.unary_map(|v| v + offset as f32, |v| v + offset)
    }

    /// Elementwise natural exponential.
    pub fn exp(&self) -> Result<Tensor, ZeroGradError> {
        self.unary_map(|v| v.exp(), |v| v.exp())
    }
}

// Manual Debug: metadata plus element count, never the full buffer.
impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(shape={:?}, dtype={:?}, numel={})",
            self.shape,
            self.dtype,
            self.numel()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_len_mismatch() {
        let result = Tensor::new(vec![1.0, 2.0, 3.0], vec![2, 2]);
        assert_eq!(
            result.unwrap_err(),
            ZeroGradError::TensorCreationError {
                data_len: 3,
                shape: vec![2, 2],
            }
        );
    }

    #[test]
    fn test_add_and_mul() -> Result<(), ZeroGradError> {
        let a = Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?;
        let b = Tensor::new(vec![10.0, 20.0, 30.0], vec![3])?;
        let sum = a.add(&b)?;
        let prod = a.mul(&b)?;
        assert_eq!(sum.get_f64_data()?, vec![11.0, 22.0, 33.0]);
        assert_eq!(prod.get_f64_data()?, vec![10.0, 40.0, 90.0]);
        Ok(())
    }

    #[test]
    fn test_binary_shape_mismatch() -> Result<(), ZeroGradError> {
        let a = Tensor::new(vec![1.0, 2.0], vec![2])?;
        let b = Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?;
        match a.add(&b) {
            Err(ZeroGradError::ShapeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, vec![2]);
                assert_eq!(actual, vec![3]);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_binary_dtype_mismatch() -> Result<(), ZeroGradError> {
        let a = Tensor::new(vec![1.0, 2.0], vec![2])?;
        let b = Tensor::new_f32(vec![1.0, 2.0], vec![2])?;
        match a.mul(&b) {
            Err(ZeroGradError::DTypeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, DType::F64);
                assert_eq!(actual, DType::F32);
            }
            other => panic!("expected DTypeMismatch, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_scale_add_scalar_exp() -> Result<(), ZeroGradError> {
        let a = Tensor::new(vec![0.0, 1.0], vec![2])?;
        assert_eq!(a.scale(3.0)?.get_f64_data()?, vec![0.0, 3.0]);
        assert_eq!(a.add_scalar(0.5)?.get_f64_data()?, vec![0.5, 1.5]);
        let e = a.exp()?.get_f64_data()?;
        assert_relative_eq!(e[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(e[1], std::f64::consts::E, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_f32_arm_dispatch() -> Result<(), ZeroGradError> {
        let a = Tensor::new_f32(vec![2.0, 3.0], vec![2])?;
        assert_eq!(a.dtype(), DType::F32);
        let doubled = a.scale(2.0)?;
        assert_eq!(doubled.dtype(), DType::F32);
        assert_eq!(doubled.get_f32_data()?, vec![4.0, 6.0]);
        Ok(())
    }
}
