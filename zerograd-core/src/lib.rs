// Top-level modules of the crate
pub mod autograd;
pub mod buffer;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod types;
pub mod utils;
pub mod variable;

// Re-export the core handle types so callers can use
// `zerograd_core::Variable` etc. directly.
pub use error::ZeroGradError;
pub use tensor::Tensor;
pub use types::DType;
pub use variable::Variable;

// The two concrete differentiable functions are the public entry points of
// the engine; everything else hangs off `Variable`.
pub use ops::math_elem::{exp_op, square_op};
