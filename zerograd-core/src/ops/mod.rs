//! # Differentiable Operations (`ops`)
//!
//! Each operation lives in a submodule as a [`Function`] implementation
//! plus a public `xxx_op` free function. The free functions all funnel
//! through [`apply_unary_op`], which owns the one wrapping step every
//! operation shares: run the forward rule on the input's data, box the
//! result, and record the application on the computation graph.

use std::sync::Arc;

use crate::autograd::function::{Function, FunctionNode};
use crate::error::ZeroGradError;
use crate::variable::Variable;

pub mod math_elem;

/// Applies a unary differentiable operation to a variable.
///
/// Performs the forward computation and the graph bookkeeping common to
/// every operation:
/// 1. evaluate `op.forward` on the input's tensor,
/// 2. box the result into a fresh output [`Variable`],
/// 3. build the [`FunctionNode`] recording the input/output linkage for
///    this one application, and
/// 4. set it as the output's creator.
///
/// # Returns
/// The output variable, with `creator` pointing at the recorded
/// application.
pub(crate) fn apply_unary_op<F>(op: F, input: &Variable) -> Result<Variable, ZeroGradError>
where
    F: Function + 'static,
{
    let x = input.data();
    let y = op.forward(&x)?;
    let output = Variable::new(y);
    let node = Arc::new(FunctionNode::new(
        Box::new(op),
        input.clone(),
        Arc::downgrade(&output.inner),
    ));
    output.set_creator(node);
    Ok(output)
}
