// src/autograd/grad_check.rs

use thiserror::Error;

use crate::error::ZeroGradError;
use crate::tensor::Tensor;
use crate::types::DType;
use crate::variable::Variable;

/// Default perturbation for the central-difference estimate.
pub const DEFAULT_EPS: f64 = 1e-4;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed at element index {element_index}: analytical grad {analytical_grad} != numerical grad {numerical_grad}. Difference: {difference}")]
    GradientMismatch {
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ZeroGradError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(ZeroGradError),

    #[error("Input variable has no gradient after the backward pass.")]
    MissingAnalyticalGrad,

    #[error("Numerical gradient is NaN or infinite at element index {element_index}.")]
    NumericalGradNaNOrInfinite { element_index: usize },

    #[error("Analytical gradient is NaN or infinite at element index {element_index}. Value: {value}")]
    AnalyticalGradNaNOrInfinite { element_index: usize, value: f64 },

    #[error("Unsupported data type for gradient check: expected F64, got {0:?}")]
    UnsupportedDType(DType),

    #[error("Gradient check input variable must be a leaf (no creator).")]
    InputNotLeaf,

    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(ZeroGradError),
}

impl From<ZeroGradError> for GradCheckError {
    fn from(err: ZeroGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Estimates `df/dx` at `x` by central difference:
/// `(f(x + eps) - f(x - eps)) / (2·eps)`.
///
/// `f` is any callable taking and returning a boxed variable. Both
/// evaluations run on fresh leaf variables, so nothing is recorded on the
/// graph of `x` itself. The estimate is elementwise and therefore exact in
/// structure for the shape-preserving elementwise functions this engine
/// provides.
///
/// This is a test oracle for the analytic backward rules, not part of the
/// production gradient path.
pub fn numerical_diff<F>(f: F, x: &Variable, eps: f64) -> Result<Tensor, ZeroGradError>
where
    F: Fn(&Variable) -> Result<Variable, ZeroGradError>,
{
    let data = x.data();
    let x0 = Variable::new(data.add_scalar(-eps)?);
    let x1 = Variable::new(data.add_scalar(eps)?);
    let y0 = f(&x0)?;
    let y1 = f(&x1)?;
    y1.data().sub(&y0.data())?.scale(1.0 / (2.0 * eps))
}

/// Checks the analytical gradient of a unary function against the
/// numerical estimate from [`numerical_diff`].
///
/// Runs `f` forward from `input`, backpropagates from the result, and
/// compares `input`'s accumulated gradient elementwise against the
/// central-difference estimate, accepting when either the absolute or the
/// relative deviation is within `tolerance`.
///
/// Requires an F64 leaf input; any gradient already present on `input` is
/// cleared first so the comparison sees exactly one backward pass.
pub fn check_unary_grad<F>(
    f: F,
    input: &Variable,
    eps: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&Variable) -> Result<Variable, ZeroGradError>,
{
    if input.dtype() != DType::F64 {
        return Err(GradCheckError::UnsupportedDType(input.dtype()));
    }
    if input.creator().is_some() {
        return Err(GradCheckError::InputNotLeaf);
    }

    input.clear_grad();
    let output = f(input).map_err(GradCheckError::ForwardPassError)?;
    output
        .backward()
        .map_err(GradCheckError::BackwardPassError)?;

    let analytical = input.grad().ok_or(GradCheckError::MissingAnalyticalGrad)?;
    let numerical = numerical_diff(&f, input, eps)?;

    let analytical_data = analytical.get_f64_data()?;
    let numerical_data = numerical.get_f64_data()?;

    for (element_index, (&analytical_grad, &numerical_grad)) in
        analytical_data.iter().zip(numerical_data.iter()).enumerate()
    {
        if numerical_grad.is_nan() || numerical_grad.is_infinite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite { element_index });
        }
        if analytical_grad.is_nan() || analytical_grad.is_infinite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                element_index,
                value: analytical_grad,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        if difference > tolerance && difference / (analytical_grad.abs() + eps) > tolerance {
            return Err(GradCheckError::GradientMismatch {
                element_index,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::function::Function;
    use crate::ops::math_elem::{exp_op, square_op};
    use crate::tensor::{self, scalar, Tensor};
    use approx::assert_relative_eq;

    #[test]
    fn test_numerical_diff_square_at_two() -> Result<(), ZeroGradError> {
        let x = Variable::new(scalar(2.0));
        let estimate = numerical_diff(square_op, &x, DEFAULT_EPS)?;
        // d(x²)/dx = 2x = 4
        assert_relative_eq!(estimate.get_f64_data()?[0], 4.0, epsilon = 1e-8);
        Ok(())
    }

    #[test]
    fn test_numerical_diff_matches_backward_elementwise() -> Result<(), ZeroGradError> {
        let x = Variable::new(Tensor::new(vec![0.5, 1.5, -2.0], vec![3])?);
        let estimate = numerical_diff(exp_op, &x, DEFAULT_EPS)?;
        let y = exp_op(&x)?;
        y.backward()?;
        let analytic = x.grad().unwrap().get_f64_data()?;
        for (&n, &a) in estimate.get_f64_data()?.iter().zip(analytic.iter()) {
            assert_relative_eq!(n, a, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_check_unary_grad_passes_for_square_and_exp() {
        let x = Variable::new(tensor::create::rand(&[3]).unwrap());
        check_unary_grad(square_op, &x, DEFAULT_EPS, 1e-4).unwrap();
        check_unary_grad(exp_op, &x, DEFAULT_EPS, 1e-4).unwrap();
    }

    /// Square with a deliberately broken backward rule (missing factor 2).
    #[derive(Debug)]
    struct HalfSquare;

    impl Function for HalfSquare {
        fn name(&self) -> &'static str {
            "half_square_op"
        }
        fn forward(&self, x: &Tensor) -> Result<Tensor, ZeroGradError> {
            x.unary_map(|v| v * v, |v| v * v)
        }
        fn backward(&self, x: &Tensor, gy: &Tensor) -> Result<Tensor, ZeroGradError> {
            x.mul(gy)
        }
    }

    #[test]
    fn test_check_unary_grad_detects_wrong_rule() {
        let x = Variable::new(scalar(2.0));
        let wrong = |v: &Variable| crate::ops::apply_unary_op(HalfSquare, v);
        // Analytic path yields 2.0, numeric estimate is 4.0.
        let result = check_unary_grad(wrong, &x, DEFAULT_EPS, 1e-4);
        assert!(matches!(
            result,
            Err(GradCheckError::GradientMismatch { .. })
        ));
    }

    #[test]
    fn test_check_unary_grad_rejects_f32_input() {
        let x = Variable::new(tensor::create::scalar_f32(1.0));
        assert_eq!(
            check_unary_grad(square_op, &x, DEFAULT_EPS, 1e-4).unwrap_err(),
            GradCheckError::UnsupportedDType(DType::F32)
        );
    }

    #[test]
    fn test_check_unary_grad_rejects_non_leaf_input() {
        let x = Variable::new(scalar(1.0));
        let y = square_op(&x).unwrap();
        assert_eq!(
            check_unary_grad(square_op, &y, DEFAULT_EPS, 1e-4).unwrap_err(),
            GradCheckError::InputNotLeaf
        );
    }
}
