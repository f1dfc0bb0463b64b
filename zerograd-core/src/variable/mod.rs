// src/variable/mod.rs

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::autograd::function::FunctionNode;
use crate::error::ZeroGradError;
use crate::tensor::Tensor;
use crate::types::DType;

mod backward;

/// Internal storage for a [`Variable`]: the boxed numeric data, its
/// optional gradient, and the optional back-reference to the graph node
/// that produced it.
pub struct VariableData {
    /// The raw numeric value. Immutable after construction.
    pub(crate) data: Tensor,
    /// The accumulated gradient, if any. Always has `data`'s shape.
    pub(crate) grad: Option<Tensor>,
    /// The function application that produced this variable. `None` for
    /// leaf variables created directly by user code.
    pub(crate) creator: Option<Arc<FunctionNode>>,
}

/// A boxed value on the computation graph.
///
/// `Variable` pairs a [`Tensor`] with an optional gradient and an optional
/// link to the function application that produced it. It uses
/// `Arc<RwLock<VariableData>>` internally so that:
/// 1. clones share one underlying node (cheap clones, stable identity for
///    graph linkage), and
/// 2. the backward traversal can accumulate gradients through an immutable
///    handle.
///
/// Only the engine's tensor type can be boxed; that contract is enforced by
/// the signature of [`Variable::new`] (there is no constructor taking a
/// bare number; wrap it first, e.g. with [`crate::tensor::scalar`]).
pub struct Variable {
    pub(crate) inner: Arc<RwLock<VariableData>>,
}

impl Variable {
    /// Creates a leaf variable: no gradient, no creator.
    pub fn new(data: Tensor) -> Self {
        Variable {
            inner: Arc::new(RwLock::new(VariableData {
                data,
                grad: None,
                creator: None,
            })),
        }
    }

    /// Acquires a read lock on the variable's data.
    /// Panics if the RwLock is poisoned.
    pub(crate) fn read_data(&self) -> RwLockReadGuard<'_, VariableData> {
        self.inner.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the variable's data.
    /// Panics if the RwLock is poisoned.
    pub(crate) fn write_data(&self) -> RwLockWriteGuard<'_, VariableData> {
        self.inner.write().expect("RwLock poisoned")
    }

    /// Returns a clone of the boxed tensor. Cheap: the element buffer is
    /// shared.
    pub fn data(&self) -> Tensor {
        self.read_data().data.clone()
    }

    /// Returns a clone of the gradient tensor, if it exists.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the graph node that produced this variable, if any.
    pub fn creator(&self) -> Option<Arc<FunctionNode>> {
        self.read_data().creator.clone()
    }

    /// Returns the data type of the boxed tensor.
    pub fn dtype(&self) -> DType {
        self.read_data().data.dtype()
    }

    /// Returns the shape of the boxed tensor.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().data.shape()
    }

    /// Returns the number of elements of the boxed tensor.
    pub fn numel(&self) -> usize {
        self.read_data().data.numel()
    }

    /// Records the producing function node. Called only by the forward
    /// wrapper in `ops`, never by user code.
    pub(crate) fn set_creator(&self, node: Arc<FunctionNode>) {
        self.write_data().creator = Some(node);
    }

    /// Resets the gradient to `None`.
    ///
    /// Gradients accumulate across `backward()` calls; call this between
    /// independent differentiations of the same leaf.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Accumulates a gradient contribution into this variable.
    ///
    /// Sums into the existing gradient if one is present, installs the
    /// tensor as-is otherwise. The contribution must match the data shape.
    pub(crate) fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), ZeroGradError> {
        let mut guard = self.write_data();
        let expected_shape = guard.data.shape();
        if grad_to_add.shape() != expected_shape {
            return Err(ZeroGradError::GradientAccumulationShapeMismatch {
                expected: expected_shape,
                actual: grad_to_add.shape(),
            });
        }
        match guard.grad.take() {
            Some(existing_grad) => {
                guard.grad = Some(existing_grad.add(&grad_to_add)?);
            }
            None => {
                guard.grad = Some(grad_to_add);
            }
        }
        Ok(())
    }
}

/// Clones the handle, not the node: both variables point at the same
/// `VariableData`, so gradient accumulation through one is visible through
/// the other.
impl Clone for Variable {
    fn clone(&self) -> Self {
        Variable {
            inner: Arc::clone(&self.inner),
        }
    }
}

// Manual Debug: metadata only, never recursing into the creator chain.
impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.read() {
            Ok(guard) => write!(
                f,
                "Variable(shape={:?}, dtype={:?}, has_grad={}, has_creator={})",
                guard.data.shape(),
                guard.data.dtype(),
                guard.grad.is_some(),
                guard.creator.is_some()
            ),
            Err(_) => write!(f, "Variable(Error: RwLock poisoned)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::scalar;
    use crate::utils::testing::check_tensor_near;

    #[test]
    fn test_leaf_has_no_grad_and_no_creator() {
        let x = Variable::new(scalar(2.0));
        assert!(x.grad().is_none());
        assert!(x.creator().is_none());
        assert_eq!(x.numel(), 1);
    }

    #[test]
    fn test_acc_grad_installs_then_sums() -> Result<(), ZeroGradError> {
        let x = Variable::new(Tensor::new(vec![1.0, 2.0], vec![2])?);
        x.acc_grad(Tensor::new(vec![0.5, 0.5], vec![2])?)?;
        x.acc_grad(Tensor::new(vec![1.0, 2.0], vec![2])?)?;
        check_tensor_near(&x.grad().unwrap(), &[2], &[1.5, 2.5], 1e-12);
        Ok(())
    }

    #[test]
    fn test_acc_grad_rejects_shape_mismatch() -> Result<(), ZeroGradError> {
        let x = Variable::new(Tensor::new(vec![1.0, 2.0], vec![2])?);
        let result = x.acc_grad(Tensor::new(vec![1.0], vec![1])?);
        assert_eq!(
            result.unwrap_err(),
            ZeroGradError::GradientAccumulationShapeMismatch {
                expected: vec![2],
                actual: vec![1],
            }
        );
        Ok(())
    }

    #[test]
    fn test_clear_grad() -> Result<(), ZeroGradError> {
        let x = Variable::new(scalar(1.0));
        x.acc_grad(scalar(3.0))?;
        assert!(x.grad().is_some());
        x.clear_grad();
        assert!(x.grad().is_none());
        Ok(())
    }

    #[test]
    fn test_clone_shares_node() -> Result<(), ZeroGradError> {
        let x = Variable::new(scalar(1.0));
        let alias = x.clone();
        alias.acc_grad(scalar(2.0))?;
        check_tensor_near(&x.grad().unwrap(), &[], &[2.0], 1e-12);
        Ok(())
    }
}
