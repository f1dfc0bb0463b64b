// src/autograd/function.rs

use std::fmt;
use std::sync::{RwLock, Weak};

use crate::error::ZeroGradError;
use crate::tensor::Tensor;
use crate::variable::{Variable, VariableData};

/// Defines the forward/backward contract of a differentiable elementwise
/// operation.
///
/// A `Function` is a pure rule: it computes on raw tensors and carries no
/// linkage of its own. The graph bookkeeping (which variable went in, which
/// came out) lives on [`FunctionNode`], built once per application by the
/// forward wrapper in `ops`.
///
/// `Debug + Send + Sync` bounds are required because the node holding the
/// rule is shared behind an `Arc` from every variable it produced.
pub trait Function: fmt::Debug + Send + Sync {
    /// Operation name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Computes the forward value `y = f(x)` elementwise.
    fn forward(&self, x: &Tensor) -> Result<Tensor, ZeroGradError>;

    /// Computes the input gradient by the chain rule.
    ///
    /// `x` is the input recorded at forward time and `gy` the gradient
    /// flowing in from the output (`dL/dy`); the result is `dL/dx`, with
    /// `x`'s shape.
    fn backward(&self, x: &Tensor, gy: &Tensor) -> Result<Tensor, ZeroGradError>;
}

/// One recorded application of a [`Function`]: the node type of the
/// implicitly-built computation graph.
///
/// Each call-site invocation builds exactly one node, so the input/output
/// linkage is fixed for the node's lifetime. The node holds the input
/// strongly (the traversal needs its data and its own creator) and the
/// output weakly: the output already owns this node through its `creator`
/// field, and a strong reference back would form a cycle.
pub struct FunctionNode {
    pub(crate) op: Box<dyn Function>,
    pub(crate) input: Variable,
    pub(crate) output: Weak<RwLock<VariableData>>,
}

impl FunctionNode {
    pub(crate) fn new(
        op: Box<dyn Function>,
        input: Variable,
        output: Weak<RwLock<VariableData>>,
    ) -> Self {
        FunctionNode { op, input, output }
    }

    /// Operation name of the recorded application.
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// The variable this application consumed.
    pub fn input(&self) -> &Variable {
        &self.input
    }

    /// Reads the gradient of the recorded output.
    ///
    /// A node is only processed after its output's gradient has been set
    /// (by the root seeding or by a previous traversal step); if that
    /// precondition does not hold this fails fast instead of producing a
    /// silently wrong gradient.
    pub(crate) fn output_grad(&self) -> Result<Tensor, ZeroGradError> {
        let output = self.output.upgrade().ok_or_else(|| {
            ZeroGradError::BackwardError(format!(
                "output of `{}` was dropped before backward traversal",
                self.op.name()
            ))
        })?;
        let guard = output.read().expect("RwLock poisoned");
        guard
            .grad
            .clone()
            .ok_or_else(|| ZeroGradError::MissingGradient {
                operation: self.op.name().to_string(),
            })
    }
}

impl fmt::Debug for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionNode({})", self.op.name())
    }
}
