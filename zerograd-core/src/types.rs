/// Defines the possible data types for Tensor elements.
///
/// The engine computes with floating-point tensors only; `F64` is the
/// primary kind and the one the gradient checker accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating-point type.
    F32,
    /// 64-bit floating-point type.
    F64,
}
