use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::Scalar;
use log::trace;
use std::cell::RefCell;
use std::collections::HashSet;

/// Stable identity of a graph node: the address of its shared `RefCell`.
/// Cloned `Tensor` handles to the same node map to the same id.
pub(crate) type NodeId<T> = *const RefCell<TensorData<T>>;

/// Builds a topological ordering of the graph reachable from `root` by
/// walking `grad_fn` edges, inputs before consumers.
///
/// The walk is an iterative depth-first post-order: each node is emitted
/// after every node it was computed from, and each reachable node is visited
/// at most once. `backward()` consumes the result in reverse, which
/// guarantees that a node is processed only after all of its consumers have
/// contributed their gradient share.
pub(crate) fn topological_sort<T: Scalar>(root: &Tensor<T>) -> Vec<Tensor<T>> {
    let mut visited: HashSet<NodeId<T>> = HashSet::new();
    let mut order: Vec<Tensor<T>> = Vec::new();
    // (node, expanded): a node is pushed once to expand its inputs and a
    // second time to be emitted after them.
    let mut stack: Vec<(Tensor<T>, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        stack.push((node.clone(), true));
        if let Some(grad_fn) = node.grad_fn() {
            for input in grad_fn.inputs() {
                if !visited.contains(&input.node_id()) {
                    stack.push((input, false));
                }
            }
        }
    }

    trace!("topological_sort: {} reachable nodes", order.len());
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetrogradError;
    use crate::ops::arithmetic::{add_op, mul_op};
    use crate::tensor::Tensor;

    #[test]
    fn test_sort_leaf_only() {
        let x = Tensor::new(vec![1.0f32], vec![1]).unwrap();
        let order = topological_sort(&x);
        assert_eq!(order.len(), 1);
        assert_eq!(order[0], x);
    }

    #[test]
    fn test_sort_inputs_before_consumers() -> Result<(), RetrogradError> {
        let a = Tensor::new(vec![2.0f32], vec![1])?;
        a.requires_grad_(true)?;
        let b = Tensor::new(vec![3.0f32], vec![1])?;
        b.requires_grad_(true)?;
        let c = mul_op(&a, &b)?;
        let d = add_op(&c, &a)?;

        let order = topological_sort(&d);
        assert_eq!(order.len(), 4);
        let pos = |t: &Tensor<f32>| order.iter().position(|n| n == t).unwrap();
        assert!(pos(&a) < pos(&c));
        assert!(pos(&b) < pos(&c));
        assert!(pos(&c) < pos(&d));
        Ok(())
    }

    #[test]
    fn test_sort_visits_shared_node_once() -> Result<(), RetrogradError> {
        let x = Tensor::new(vec![1.0f32, 2.0], vec![2])?;
        x.requires_grad_(true)?;
        // x feeds both operands; it must still appear exactly once.
        let y = add_op(&x, &x)?;
        let order = topological_sort(&y);
        assert_eq!(order.len(), 2);
        Ok(())
    }
}
