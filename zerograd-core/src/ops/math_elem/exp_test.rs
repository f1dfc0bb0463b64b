// src/ops/math_elem/exp_test.rs

use crate::autograd::grad_check::{check_unary_grad, DEFAULT_EPS};
use crate::error::ZeroGradError;
use crate::ops::math_elem::exp_op;
use crate::tensor::{self, scalar, Tensor};
use crate::utils::testing::check_tensor_near;
use crate::variable::Variable;
use approx::assert_relative_eq;

#[test]
fn test_exp_forward() -> Result<(), ZeroGradError> {
    let x = Variable::new(scalar(2.0));
    let y = exp_op(&x)?;
    assert_relative_eq!(y.data().get_f64_data()?[0], 2.0f64.exp(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_exp_backward() -> Result<(), ZeroGradError> {
    let x = Variable::new(scalar(2.0));
    let y = exp_op(&x)?;
    y.backward()?;
    // dy/dx = e^x with seed gradient 1
    check_tensor_near(&x.grad().unwrap(), &[], &[2.0f64.exp()], 1e-12);
    Ok(())
}

#[test]
fn test_exp_backward_vector_with_upstream_grad() -> Result<(), ZeroGradError> {
    let x = Variable::new(Tensor::new(vec![0.0, 1.0], vec![2])?);
    let y = exp_op(&x)?;
    y.acc_grad(Tensor::new(vec![2.0, 3.0], vec![2])?)?;
    y.backward()?;
    let e = std::f64::consts::E;
    check_tensor_near(&x.grad().unwrap(), &[2], &[2.0, 3.0 * e], 1e-12);
    Ok(())
}

#[test]
fn test_exp_gradient_check() {
    let x = Variable::new(tensor::create::rand(&[1]).unwrap());
    check_unary_grad(exp_op, &x, DEFAULT_EPS, 1e-4).unwrap();
}

#[test]
fn test_exp_gradient_check_at_normal_point() {
    let x = Variable::new(tensor::create::randn(&[1]).unwrap());
    check_unary_grad(exp_op, &x, DEFAULT_EPS, 1e-4).unwrap();
}
