use crate::error::RetrogradError;
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable operation.
///
/// Any operation that creates a non-leaf `Tensor` (a tensor resulting from an
/// operation on inputs that require gradients) has an associated `BackwardOp`
/// implementation. The instance is stored in the output tensor's `grad_fn`
/// field and invoked during `backward()` to propagate gradients according to
/// the chain rule.
pub trait BackwardOp<T: Scalar>: Debug {
    /// Computes the gradients of the operation's inputs, given the gradient
    /// of the operation's output.
    ///
    /// If the operation is `output = f(input_1, ..., input_n)`, this method
    /// receives dL/dOutput and must return dL/dInput_i for each input `i`.
    ///
    /// # Returns
    /// One gradient tensor per input, in the order returned by [`inputs`].
    /// Each gradient has the shape of the corresponding input.
    ///
    /// [`inputs`]: BackwardOp::inputs
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError>;

    /// Returns the input nodes recorded during the forward pass, in forward
    /// order. These are the links from this operation back to its
    /// predecessors in the graph; holding them as strong handles keeps the
    /// recorded subgraph alive for the duration of the backward pass.
    fn inputs(&self) -> Vec<Tensor<T>>;
}
