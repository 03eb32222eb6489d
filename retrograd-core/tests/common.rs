use retrograd_core::tensor::Tensor;
use retrograd_core::types::Scalar;

// Helper to create a leaf tensor for testing.
// Added allow(dead_code) because usage across different test crates isn't
// detected easily.
#[allow(dead_code)]
pub(crate) fn leaf<T: Scalar>(data: Vec<T>, shape: Vec<usize>) -> Tensor<T> {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

// Helper to create a leaf tensor with gradient tracking enabled.
#[allow(dead_code)]
pub(crate) fn tracked_leaf<T: Scalar>(data: Vec<T>, shape: Vec<usize>) -> Tensor<T> {
    let tensor = leaf(data, shape);
    tensor
        .requires_grad_(true)
        .expect("requires_grad_ failed on a fresh leaf");
    tensor
}
