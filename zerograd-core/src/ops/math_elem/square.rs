// src/ops/math_elem/square.rs

use crate::autograd::function::Function;
use crate::error::ZeroGradError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Element-wise square.
#[derive(Debug)]
pub(crate) struct Square;

impl Function for Square {
    fn name(&self) -> &'static str {
        "square_op"
    }

    /// \( y = x^2 \)
    fn forward(&self, x: &Tensor) -> Result<Tensor, ZeroGradError> {
        x.unary_map(|v| v * v, |v| v * v)
    }

    /// Computes the gradient for \( y = x^2 \):
    /// \\[ \frac{dL}{dx} = 2 \cdot x \cdot \frac{dL}{dy} \\]
    fn backward(&self, x: &Tensor, gy: &Tensor) -> Result<Tensor, ZeroGradError> {
        x.mul(gy)?.scale(2.0)
    }
}

/// Computes the element-wise square of a variable.
///
/// The operation is recorded on the computation graph, so a later
/// `backward()` on the result (or on anything downstream of it) propagates
/// gradients through it.
pub fn square_op(input: &Variable) -> Result<Variable, ZeroGradError> {
    apply_unary_op(Square, input)
}

#[cfg(test)]
#[path = "square_test.rs"]
mod tests;
