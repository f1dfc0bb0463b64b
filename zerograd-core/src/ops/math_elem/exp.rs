// src/ops/math_elem/exp.rs

use crate::autograd::function::Function;
use crate::error::ZeroGradError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;
use crate::variable::Variable;

/// Element-wise natural exponential.
#[derive(Debug)]
pub(crate) struct Exp;

impl Function for Exp {
    fn name(&self) -> &'static str {
        "exp_op"
    }

    /// \( y = e^x \)
    fn forward(&self, x: &Tensor) -> Result<Tensor, ZeroGradError> {
        x.exp()
    }

    /// Computes the gradient for \( y = e^x \):
    /// \\[ \frac{dL}{dx} = e^x \cdot \frac{dL}{dy} \\]
    ///
    /// The exponential is recomputed from the recorded input rather than
    /// cached from the forward pass.
    fn backward(&self, x: &Tensor, gy: &Tensor) -> Result<Tensor, ZeroGradError> {
        x.exp()?.mul(gy)
    }
}

/// Computes the element-wise natural exponential of a variable, recording
/// the operation on the computation graph.
pub fn exp_op(input: &Variable) -> Result<Variable, ZeroGradError> {
    apply_unary_op(Exp, input)
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
