// retrograd-core/src/tensor/autograd.rs

use crate::autograd::graph::{topological_sort, NodeId};
use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::binary_kernel;
use crate::tensor::create::ones_like;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::Scalar;
use log::{debug, trace};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

impl<T: Scalar> Tensor<T> {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// True for tensors created directly (constructors, `detach`), false for
    /// outputs of recorded operations.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf
    }

    /// Sets the `requires_grad` status of this tensor **in-place**.
    /// Only allowed on leaf tensors; disabling also drops any accumulated
    /// gradient.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), RetrogradError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(RetrogradError::RequiresGradOnNonLeaf);
        }
        guard.requires_grad = requires_grad;
        if !requires_grad {
            guard.grad = None;
        }
        Ok(())
    }

    /// Returns a handle to the accumulated gradient tensor, if any.
    pub fn grad(&self) -> Option<Tensor<T>> {
        self.read_data().grad.clone()
    }

    /// Returns a handle to the producing operation node, if any.
    pub fn grad_fn(&self) -> Option<Rc<dyn BackwardOp<T>>> {
        self.read_data().grad_fn.clone()
    }

    /// Creates a new leaf tensor carrying the same numeric contents but
    /// severed from the graph: no producer, no gradient requirement.
    ///
    /// Gradient flow from downstream uses of the detached tensor stops here;
    /// backward passes through the original (non-detached) path are
    /// unaffected.
    pub fn detach(&self) -> Tensor<T> {
        let guard = self.read_data();
        let detached = TensorData {
            data: guard.data.clone(),
            shape: guard.shape.clone(),
            requires_grad: false,
            is_leaf: true,
            grad: None,
            grad_fn: None,
        };
        drop(guard);
        Tensor {
            data: Rc::new(RefCell::new(detached)),
        }
    }

    /// Zeroes the accumulated gradient buffer **in place**.
    /// A tensor whose gradient was never allocated is left untouched.
    pub fn zero_grad(&self) {
        let guard = self.read_data();
        if let Some(grad) = &guard.grad {
            let mut grad_guard = grad.write_data();
            for value in grad_guard.data.iter_mut() {
                *value = T::zero();
            }
        }
    }

    /// Drops the gradient buffer entirely, returning the tensor to its
    /// never-accumulated state.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Accumulates (sums) the given gradient into this tensor's `grad`
    /// buffer. The first accumulation allocates a private copy so the buffer
    /// is owned by this node alone; later ones add element-wise in place.
    pub(crate) fn acc_grad(&self, incoming: &Tensor<T>) -> Result<(), RetrogradError> {
        let mut guard = self.write_data();
        let incoming_guard = incoming.read_data();
        if incoming_guard.shape != guard.shape {
            return Err(RetrogradError::GradientShapeMismatch {
                expected: guard.shape.clone(),
                actual: incoming_guard.shape.clone(),
            });
        }
        match &guard.grad {
            Some(existing) => {
                trace!("acc_grad: summing into existing buffer");
                let mut existing_guard = existing.write_data();
                for (slot, &value) in existing_guard.data.iter_mut().zip(incoming_guard.data.iter())
                {
                    *slot += value;
                }
            }
            None => {
                let fresh = Tensor::new(incoming_guard.data.clone(), incoming_guard.shape.clone())?;
                drop(incoming_guard);
                guard.grad = Some(fresh);
            }
        }
        Ok(())
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// Walks the recorded graph in reverse topological order, invoking each
    /// producing operation's backward rule exactly once and accumulating
    /// gradients into the graph's leaves. Gradient buffers persist across
    /// calls: running backward twice without [`zero_grad`](Tensor::zero_grad)
    /// doubles the accumulated result.
    ///
    /// # Arguments
    /// * `gradient`: seed gradient for this tensor, interpreted as the
    ///   left-multiplying covector. May be `None` only for a scalar output,
    ///   in which case a ones seed is used.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor does not require gradients.
    /// * `BackwardNonScalar` if this tensor is not a scalar and no seed is
    ///   provided.
    /// * `GradientShapeMismatch` if the provided seed has the wrong shape.
    /// * `MissingProducer` if the traversal reaches a gradient-requiring
    ///   tensor that has no recorded producer and is not a leaf.
    pub fn backward(&self, gradient: Option<&Tensor<T>>) -> Result<(), RetrogradError> {
        if !self.requires_grad() {
            return Err(RetrogradError::RequiresGradNotMet);
        }

        // The seed is copied into a private leaf so the traversal never
        // aliases caller-owned buffers.
        let seed = match gradient {
            Some(g) => {
                if g.shape() != self.shape() {
                    return Err(RetrogradError::GradientShapeMismatch {
                        expected: self.shape(),
                        actual: g.shape(),
                    });
                }
                Tensor::new(g.data(), g.shape())?
            }
            None => {
                if self.numel() != 1 {
                    return Err(RetrogradError::BackwardNonScalar);
                }
                ones_like(self)?
            }
        };

        let order = topological_sort(self);
        debug!("backward: traversing {} nodes", order.len());

        let mut grads: HashMap<NodeId<T>, Tensor<T>> = HashMap::new();
        grads.insert(self.node_id(), seed);

        for node in order.iter().rev() {
            let grad = match grads.remove(&node.node_id()) {
                Some(g) => g,
                // No gradient flowed back to this node.
                None => continue,
            };

            match node.grad_fn() {
                Some(op) => {
                    trace!("backward: applying {:?}", op);
                    let input_grads = op.backward(&grad)?;
                    let inputs = op.inputs();
                    if input_grads.len() != inputs.len() {
                        return Err(RetrogradError::InternalError(format!(
                            "backward rule produced {} gradients for {} inputs",
                            input_grads.len(),
                            inputs.len()
                        )));
                    }
                    for (input, input_grad) in inputs.iter().zip(input_grads) {
                        if !input.requires_grad() {
                            // Detached values and plain constants are graph
                            // roots; traversal halts here.
                            continue;
                        }
                        match grads.entry(input.node_id()) {
                            Entry::Occupied(mut slot) => {
                                // Two consumers contributed; merge out of
                                // place so neither contribution is mutated.
                                let merged =
                                    binary_kernel(slot.get(), &input_grad, "grad_merge", |x, y| {
                                        x + y
                                    })?;
                                slot.insert(merged);
                            }
                            Entry::Vacant(slot) => {
                                slot.insert(input_grad);
                            }
                        }
                    }
                }
                None => {
                    if node.is_leaf() {
                        node.acc_grad(&grad)?;
                    } else if node.requires_grad() {
                        return Err(RetrogradError::MissingProducer);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::arithmetic::mul_scalar_op;

    #[test]
    fn test_requires_grad_roundtrip() {
        let t = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
        assert!(!t.requires_grad());
        t.requires_grad_(true).unwrap();
        assert!(t.requires_grad());
        t.requires_grad_(false).unwrap();
        assert!(!t.requires_grad());
    }

    #[test]
    fn test_requires_grad_rejected_on_non_leaf() {
        let t = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
        t.requires_grad_(true).unwrap();
        let y = mul_scalar_op(&t, 2.0).unwrap();
        assert!(!y.is_leaf());
        assert_eq!(
            y.requires_grad_(false),
            Err(RetrogradError::RequiresGradOnNonLeaf)
        );
    }

    #[test]
    fn test_detach_shares_values_not_history() {
        let x = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
        x.requires_grad_(true).unwrap();
        let y = mul_scalar_op(&x, 3.0).unwrap();
        let d = y.detach();

        assert_eq!(d.data(), y.data());
        assert!(d.is_leaf());
        assert!(!d.requires_grad());
        assert!(d.grad_fn().is_none());
        // The original node keeps its producer.
        assert!(y.grad_fn().is_some());
    }

    #[test]
    fn test_backward_requires_grad() {
        let t = Tensor::new(vec![1.0f32], vec![1]).unwrap();
        assert_eq!(t.backward(None), Err(RetrogradError::RequiresGradNotMet));
    }

    #[test]
    fn test_backward_missing_producer() {
        let t = Tensor::scalar(2.0f32);
        {
            // Simulate a node whose graph history was torn out from under it.
            let mut guard = t.write_data();
            guard.requires_grad = true;
            guard.is_leaf = false;
        }
        assert_eq!(t.backward(None), Err(RetrogradError::MissingProducer));
    }

    #[test]
    fn test_zero_grad_in_place() {
        let x = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
        x.requires_grad_(true).unwrap();
        let y = mul_scalar_op(&x, 5.0).unwrap();
        y.backward(Some(&Tensor::new(vec![1.0, 1.0], vec![2]).unwrap()))
            .unwrap();

        let grad = x.grad().expect("grad missing");
        assert_eq!(grad.data(), vec![5.0, 5.0]);

        x.zero_grad();
        // The buffer is reset in place: same node, zeroed contents.
        let grad_after = x.grad().expect("grad buffer should survive zero_grad");
        assert_eq!(grad_after, grad);
        assert_eq!(grad_after.data(), vec![0.0, 0.0]);

        x.clear_grad();
        assert!(x.grad().is_none());
    }
}
