//! # Differentiable operations (`ops`)
//!
//! Operations are grouped by family:
//!
//! - [`arithmetic`]: element-wise arithmetic (add, sub, mul, div, neg, pow)
//!   and their scalar-broadcast variants.
//! - [`math_elem`]: element-wise math functions (exp, ln, sqrt).
//! - [`reduction`]: reductions to a scalar (sum, mean).
//! - [`linalg`]: linear algebra (dot).
//!
//! Each operation has a core `xxx_op` function performing the forward
//! computation and, when any input requires gradients, installing a
//! `XxxBackward` record implementing
//! [`BackwardOp`](crate::autograd::BackwardOp) on the output. Backward rules
//! compute their gradients through the raw kernels below, which never record,
//! so a backward pass cannot grow the graph it is traversing.

pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

/// Applies an element-wise unary function, producing a plain leaf tensor.
/// No gradient recording happens here.
pub(crate) fn unary_kernel<T, F>(a: &Tensor<T>, f: F) -> Result<Tensor<T>, RetrogradError>
where
    T: Scalar,
    F: Fn(T) -> T,
{
    let guard = a.read_data();
    let data = guard.data.iter().map(|&x| f(x)).collect();
    let shape = guard.shape.clone();
    drop(guard);
    Tensor::new(data, shape)
}

/// Applies an element-wise binary function over same-shaped tensors,
/// producing a plain leaf tensor. No gradient recording happens here.
///
/// # Errors
/// Returns `RetrogradError::ShapeMismatch` (tagged with `op_name`) when the
/// operand shapes differ; implicit broadcasting is not supported.
pub(crate) fn binary_kernel<T, F>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    op_name: &str,
    f: F,
) -> Result<Tensor<T>, RetrogradError>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    let a_guard = a.read_data();
    let b_guard = b.read_data();
    if a_guard.shape != b_guard.shape {
        return Err(RetrogradError::ShapeMismatch {
            expected: a_guard.shape.clone(),
            actual: b_guard.shape.clone(),
            operation: op_name.to_string(),
        });
    }
    let data = a_guard
        .data
        .iter()
        .zip(b_guard.data.iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    let shape = a_guard.shape.clone();
    drop(a_guard);
    drop(b_guard);
    Tensor::new(data, shape)
}

/// Installs a backward record on a freshly computed output: the output starts
/// requiring gradients, stops being a leaf, and points back at its producer.
pub(crate) fn record_op<T: Scalar>(output: &Tensor<T>, grad_fn: Rc<dyn BackwardOp<T>>) {
    let mut guard = output.write_data();
    guard.requires_grad = true;
    guard.is_leaf = false;
    guard.grad_fn = Some(grad_fn);
}
