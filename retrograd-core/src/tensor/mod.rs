// retrograd-core/src/tensor/mod.rs

use crate::autograd::graph::NodeId;
use crate::error::RetrogradError;
use crate::tensor_data::TensorData;
use crate::types::Scalar;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

mod autograd;
pub mod create;
mod ops_methods;

pub use create::{
    arange, from_vec, full, linspace, ones, ones_like, randn, uniform, zeros, zeros_like,
};

/// The public, user-facing tensor type: a handle to one node of the implicit
/// computation graph.
///
/// `Tensor` wraps its node data in `Rc<RefCell<TensorData>>`:
/// 1.  **Shared ownership** — clones are cheap and point at the same node, so
///     recorded operations can keep their inputs alive.
/// 2.  **Interior mutability** — autograd metadata (`requires_grad`, `grad`)
///     can be updated through a shared handle during the backward pass.
///
/// Construction and traversal are single-threaded and synchronous; handles
/// are not meant to cross threads.
pub struct Tensor<T: Scalar> {
    pub(crate) data: Rc<RefCell<TensorData<T>>>,
}

impl<T: Scalar> Tensor<T> {
    /// Creates a new leaf tensor from raw data and shape.
    /// Gradient tracking is disabled by default. An empty shape denotes a
    /// scalar holding exactly one element.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, RetrogradError> {
        let tensor_data = TensorData::new(data, shape)?;
        Ok(Tensor {
            data: Rc::new(RefCell::new(tensor_data)),
        })
    }

    /// Creates a scalar (zero-dimensional) leaf tensor.
    pub fn scalar(value: T) -> Self {
        Tensor {
            data: Rc::new(RefCell::new(TensorData {
                data: vec![value],
                shape: vec![],
                requires_grad: false,
                is_leaf: true,
                grad: None,
                grad_fn: None,
            })),
        }
    }

    // --- Accessors ---

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the total number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns a clone of the underlying data buffer, in row-major order.
    pub fn data(&self) -> Vec<T> {
        self.read_data().data.clone()
    }

    /// Extracts the single element of a scalar tensor.
    ///
    /// # Errors
    /// Returns `RetrogradError::NotAScalar` if the tensor holds more than one
    /// element.
    pub fn item(&self) -> Result<T, RetrogradError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(RetrogradError::NotAScalar {
                shape: guard.shape.clone(),
            });
        }
        Ok(guard.data[0])
    }

    /// Returns the element at the given multi-dimensional index.
    pub fn get(&self, indices: &[usize]) -> Result<T, RetrogradError> {
        let guard = self.read_data();
        let offset = guard.offset_of(indices)?;
        Ok(guard.data[offset])
    }

    /// Provides temporary immutable access to the internal node data.
    /// The `Ref` acts like a read lock; ensure it's dropped promptly.
    pub(crate) fn read_data(&self) -> Ref<'_, TensorData<T>> {
        self.data.borrow()
    }

    /// Provides temporary mutable access to the internal node data.
    /// The `RefMut` acts like a write lock; ensure it's dropped promptly.
    pub(crate) fn write_data(&self) -> RefMut<'_, TensorData<T>> {
        self.data.borrow_mut()
    }

    /// Stable graph identity of this node, shared by all clones of the handle.
    pub(crate) fn node_id(&self) -> NodeId<T> {
        Rc::as_ptr(&self.data)
    }
}

// --- Trait implementations for the handle ---

impl<T: Scalar> Clone for Tensor<T> {
    /// Clones the handle (bumps the `Rc` count); the node is shared, not copied.
    fn clone(&self) -> Self {
        Tensor {
            data: Rc::clone(&self.data),
        }
    }
}

impl<T: Scalar> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = self.read_data();
        f.debug_struct("Tensor")
            .field("data", &td.data)
            .field("shape", &td.shape)
            .field("requires_grad", &td.requires_grad)
            .field("is_leaf", &td.is_leaf)
            .field("grad_defined", &td.grad.is_some())
            .field("grad_fn_defined", &td.grad_fn.is_some())
            .finish()
    }
}

/// Equality is node identity, consistent with `Hash`: two handles are equal
/// only if they point at the same graph node.
impl<T: Scalar> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Scalar> Eq for Tensor<T> {}

impl<T: Scalar> Hash for Tensor<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.data).hash(state);
    }
}

// --- Tests ---
