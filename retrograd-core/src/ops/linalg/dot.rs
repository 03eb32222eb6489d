// retrograd-core/src/ops/linalg/dot.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

/// Backward rule for the dot product `z = a . b` of two vectors:
/// dL/da = dL/dz * b and dL/db = dL/dz * a, with dL/dz a scalar.
#[derive(Debug)]
struct DotBackward<T: Scalar> {
    a: Tensor<T>,
    b: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for DotBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let seed = grad_output.item()?;
        let grad_a = unary_kernel(&self.b, |y| y * seed)?;
        let grad_b = unary_kernel(&self.a, |x| x * seed)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Dot product of two 1-D tensors of equal length, producing a scalar, with
/// gradient tracking.
pub fn dot_op<T: Scalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let total: T = {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        if a_guard.shape.len() != 1 || b_guard.shape.len() != 1 {
            return Err(RetrogradError::UnsupportedOperation(format!(
                "dot_op expects 1-D tensors, got shapes {:?} and {:?}",
                a_guard.shape, b_guard.shape
            )));
        }
        if a_guard.shape != b_guard.shape {
            return Err(RetrogradError::ShapeMismatch {
                expected: a_guard.shape.clone(),
                actual: b_guard.shape.clone(),
                operation: "dot_op".to_string(),
            });
        }
        a_guard
            .data
            .iter()
            .zip(b_guard.data.iter())
            .map(|(&x, &y)| x * y)
            .sum()
    };
    let output = Tensor::new(vec![total], vec![])?;
    if a.requires_grad() || b.requires_grad() {
        record_op(
            &output,
            Rc::new(DotBackward {
                a: a.clone(),
                b: b.clone(),
            }),
        );
    }
    Ok(output)
}
