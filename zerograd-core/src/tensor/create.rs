// src/tensor/create.rs

use crate::error::ZeroGradError;
use crate::tensor::Tensor;
use crate::types::DType;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a new f64 tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![0.0; numel], shape.to_vec())
}

/// Creates a new f32 tensor filled with zeros with the specified shape.
pub fn zeros_f32(shape: &[usize]) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    Tensor::new_f32(vec![0.0; numel], shape.to_vec())
}

/// Creates a new f64 tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![1.0; numel], shape.to_vec())
}

/// Creates a new f32 tensor filled with ones with the specified shape.
pub fn ones_f32(shape: &[usize]) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    Tensor::new_f32(vec![1.0; numel], shape.to_vec())
}

/// Creates a new f64 tensor filled with a specific value.
pub fn full(shape: &[usize], value: f64) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new f32 tensor filled with a specific value.
pub fn full_f32(shape: &[usize], value: f32) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    Tensor::new_f32(vec![value; numel], shape.to_vec())
}

/// Creates a new f64 tensor from a `Vec<f64>` and shape.
pub fn from_vec_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Tensor, ZeroGradError> {
    Tensor::new(data_vec, shape)
}

/// Creates a new f32 tensor from a `Vec<f32>` and shape.
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, ZeroGradError> {
    Tensor::new_f32(data_vec, shape)
}

/// Wraps a bare f64 number into a 0-dimensional tensor (shape `[]`).
///
/// This is the boundary where plain scalars enter the engine; everything
/// past it operates on tensors only.
pub fn scalar(value: f64) -> Tensor {
    // A 0-dim shape has numel 1, so this construction cannot fail.
    Tensor {
        buffer: std::sync::Arc::new(crate::buffer::CpuBuffer::F64(std::sync::Arc::new(vec![
            value,
        ]))),
        dtype: DType::F64,
        shape: vec![],
    }
}

/// Wraps a bare f32 number into a 0-dimensional tensor (shape `[]`).
pub fn scalar_f32(value: f32) -> Tensor {
    Tensor {
        buffer: std::sync::Arc::new(crate::buffer::CpuBuffer::F32(std::sync::Arc::new(vec![
            value,
        ]))),
        dtype: DType::F32,
        shape: vec![],
    }
}

/// Creates a new tensor filled with zeros, matching the shape and dtype of
/// the input tensor.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, ZeroGradError> {
    let shape = tensor.shape();
    match tensor.dtype() {
        DType::F32 => {
            let numel = shape.iter().product();
            Tensor::new_f32(vec![0.0; numel], shape)
        }
        DType::F64 => {
            let numel = shape.iter().product();
            Tensor::new(vec![0.0; numel], shape)
        }
    }
}

/// Creates a new tensor filled with ones, matching the shape and dtype of
/// the input tensor.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, ZeroGradError> {
    let shape = tensor.shape();
    match tensor.dtype() {
        DType::F32 => {
            let numel = shape.iter().product();
            Tensor::new_f32(vec![1.0; numel], shape)
        }
        DType::F64 => {
            let numel = shape.iter().product();
            Tensor::new(vec![1.0; numel], shape)
        }
    }
}

/// Creates a new f64 tensor with elements drawn uniformly from `[0, 1)`.
pub fn rand(shape: &[usize]) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel).map(|_| rng.gen::<f64>()).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Creates a new f64 tensor with elements drawn from the standard normal
/// distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, ZeroGradError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f64> = (0..numel)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    Tensor::new(data_vec, shape.to_vec())
}
