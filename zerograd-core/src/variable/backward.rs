// src/variable/backward.rs

use std::sync::Arc;

use crate::autograd::function::FunctionNode;
use crate::error::ZeroGradError;
use crate::tensor::create::ones_like;
use crate::variable::Variable;

impl Variable {
    /// Performs the backward pass starting from this variable.
    ///
    /// If this variable has no gradient yet, it is seeded with a tensor of
    /// ones matching its data shape (`∂self/∂self = 1`). The traversal then
    /// walks the recorded `creator` links iteratively (an explicit
    /// work-list rather than recursion, so chain length is not bounded by
    /// the call stack) and accumulates a gradient into every ancestor.
    ///
    /// Gradient contributions are summed, not overwritten: calling
    /// `backward()` twice without [`Variable::clear_grad`] doubles the leaf
    /// gradients, and a leaf feeding several functions receives the sum of
    /// all paths.
    ///
    /// # Errors
    /// Fails fast with `MissingGradient` or `BackwardError` if the graph is
    /// in a state that violates the traversal's preconditions (an output
    /// gradient absent when its node is processed, or a recorded output
    /// that no longer exists), and propagates any tensor-arithmetic error
    /// from the backward rules.
    pub fn backward(&self) -> Result<(), ZeroGradError> {
        // Seed the root gradient before looking at the graph, so that even
        // a leaf ends up with ∂x/∂x = 1.
        {
            let mut guard = self.write_data();
            if guard.grad.is_none() {
                guard.grad = Some(ones_like(&guard.data)?);
            }
        }

        let mut funcs: Vec<Arc<FunctionNode>> = match self.creator() {
            Some(creator) => vec![creator],
            None => {
                log::debug!("backward() called on a leaf variable. No operation to perform.");
                return Ok(());
            }
        };

        while let Some(f) = funcs.pop() {
            let gy = f.output_grad()?;
            let x = f.input.data();
            let gx = f.op.backward(&x, &gy)?;
            f.input.acc_grad(gx)?;

            if let Some(prev) = f.input.creator() {
                funcs.push(prev);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
