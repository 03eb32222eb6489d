//! retrograd-core: a reverse-mode automatic differentiation engine.
//!
//! Tensors are handles to nodes of an implicit computation graph, built
//! lazily as differentiable operations execute. Calling
//! [`Tensor::backward`] walks the recorded graph in reverse topological
//! order and accumulates gradients into the graph's leaves.

pub mod autograd;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod types;

pub use error::RetrogradError;
pub use tensor::Tensor;
pub use types::Scalar;

// Re-export traits required by public generic bounds.
pub use num_traits;
