// retrograd-core/src/tensor_data.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::rc::Rc;

/// Internal storage and metadata for a tensor node.
///
/// This struct holds the flat, contiguous, row-major data buffer, the shape,
/// and the autograd bookkeeping. It is wrapped in `Rc<RefCell<TensorData>>`
/// by the `Tensor` struct to allow shared ownership and interior mutability;
/// the engine is single-threaded by design, so no lock is involved.
pub struct TensorData<T: Scalar> {
    /// The element buffer, laid out in row-major order.
    pub(crate) data: Vec<T>,
    /// The shape (dimensions) of the tensor. An empty shape denotes a scalar.
    pub(crate) shape: Vec<usize>,
    /// Flag indicating if the tensor participates in gradient computation.
    /// Operations involving this tensor are then recorded in the graph.
    pub(crate) requires_grad: bool,
    /// True for tensors created directly (constructors, `detach`), false for
    /// outputs of recorded operations. Gradients are only retained on leaves.
    pub(crate) is_leaf: bool,
    /// The accumulated gradient, if any. Always matches `shape` once allocated.
    pub(crate) grad: Option<Tensor<T>>,
    /// The operation that produced this tensor, linking it to its inputs.
    /// Leaf tensors have no producer.
    pub(crate) grad_fn: Option<Rc<dyn BackwardOp<T>>>,
}

impl<T: Scalar> TensorData<T> {
    /// Creates a fresh leaf node from raw data and shape.
    ///
    /// # Errors
    /// Returns `RetrogradError::TensorCreationError` if the length of `data`
    /// does not match the number of elements implied by `shape`.
    pub(crate) fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, RetrogradError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(RetrogradError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(TensorData {
            data,
            shape,
            requires_grad: false,
            is_leaf: true,
            grad: None,
            grad_fn: None,
        })
    }

    /// Number of elements in the buffer.
    pub(crate) fn numel(&self) -> usize {
        self.data.len()
    }

    /// Row-major offset of the given multi-dimensional index.
    pub(crate) fn offset_of(&self, indices: &[usize]) -> Result<usize, RetrogradError> {
        if indices.len() != self.shape.len() {
            return Err(RetrogradError::IndexOutOfBounds {
                index: indices.to_vec(),
                shape: self.shape.clone(),
            });
        }
        let mut offset = 0;
        let mut stride = 1;
        for dim in (0..self.shape.len()).rev() {
            if indices[dim] >= self.shape[dim] {
                return Err(RetrogradError::IndexOutOfBounds {
                    index: indices.to_vec(),
                    shape: self.shape.clone(),
                });
            }
            offset += indices[dim] * stride;
            stride *= self.shape[dim];
        }
        Ok(offset)
    }
}

// Manual Debug: `grad` and `grad_fn` are summarized rather than printed in
// full, which keeps graph nodes readable in traces.
impl<T: Scalar> Debug for TensorData<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TensorData")
            .field("data", &self.data)
            .field("shape", &self.shape)
            .field("requires_grad", &self.requires_grad)
            .field("is_leaf", &self.is_leaf)
            .field("grad_defined", &self.grad.is_some())
            .field("grad_fn_defined", &self.grad_fn.is_some())
            .finish()
    }
}
