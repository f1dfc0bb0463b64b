use crate::tensor::Tensor;
use crate::variable::Variable;

/// Checks if a tensor matches an expected shape and data within tolerance.
/// Assumes the actual tensor is F64.
/// Panics if the shape differs or any element differs significantly.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data_vec = actual
        .get_f64_data()
        .expect("Failed to get F64 data in check_tensor_near");

    assert_eq!(
        actual_data_vec.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data_vec.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a leaf variable from f64 data for testing purposes.
pub fn create_test_variable(data: Vec<f64>, shape: Vec<usize>) -> Variable {
    let tensor = Tensor::new(data, shape).expect("Failed to create test tensor");
    Variable::new(tensor)
}
