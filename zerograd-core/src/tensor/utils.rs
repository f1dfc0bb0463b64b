// src/tensor/utils.rs

use num_traits::Float;

/// Maps an elementwise operation over a slice, collecting into a new vec.
/// Shared by both dtype arms of the tensor dispatch.
pub(crate) fn map_slice<T, F>(xs: &[T], op: F) -> Vec<T>
where
    T: Float,
    F: Fn(T) -> T,
{
    xs.iter().map(|&x| op(x)).collect()
}

/// Zips two equal-length slices through an elementwise operation.
/// Callers are responsible for the length check (done via shapes).
pub(crate) fn zip_slice<T, F>(xs: &[T], ys: &[T], op: F) -> Vec<T>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    xs.iter().zip(ys.iter()).map(|(&x, &y)| op(x, y)).collect()
}
