use std::sync::Arc;

use crate::error::ZeroGradError;
use crate::types::DType;

/// Typed CPU storage for tensor elements.
///
/// The buffer is wrapped in an `Arc` by `Tensor` so that clones of a tensor
/// share the same allocation. The engine is CPU-only; there is no device
/// dispatch above this enum.
#[derive(Debug, Clone)]
pub enum CpuBuffer {
    /// Buffer holding f32 data.
    F32(Arc<Vec<f32>>),
    /// Buffer holding f64 data.
    F64(Arc<Vec<f64>>),
}

impl CpuBuffer {
    /// Returns the number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            CpuBuffer::F32(data) => data.len(),
            CpuBuffer::F64(data) => data.len(),
        }
    }

    /// Returns true if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element kind stored in this buffer.
    pub fn dtype(&self) -> DType {
        match self {
            CpuBuffer::F32(_) => DType::F32,
            CpuBuffer::F64(_) => DType::F64,
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f32>>`.
    ///
    /// Returns an error if the buffer is not of type F32.
    pub fn try_get_f32(&self) -> Result<&Arc<Vec<f32>>, ZeroGradError> {
        match self {
            CpuBuffer::F32(data_arc) => Ok(data_arc),
            CpuBuffer::F64(_) => Err(ZeroGradError::DTypeMismatch {
                expected: DType::F32,
                actual: DType::F64,
                operation: "try_get_f32".to_string(),
            }),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f64>>`.
    ///
    /// Returns an error if the buffer is not of type F64.
    pub fn try_get_f64(&self) -> Result<&Arc<Vec<f64>>, ZeroGradError> {
        match self {
            CpuBuffer::F64(data_arc) => Ok(data_arc),
            CpuBuffer::F32(_) => Err(ZeroGradError::DTypeMismatch {
                expected: DType::F64,
                actual: DType::F32,
                operation: "try_get_f64".to_string(),
            }),
        }
    }
}
