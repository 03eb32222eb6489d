// retrograd-core/src/ops/math_elem/sqrt.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

/// Backward rule for the element-wise square root `z = sqrt(a)`:
/// dL/da = dL/dz / (2 * sqrt(a)).
#[derive(Debug)]
struct SqrtBackward<T: Scalar> {
    a: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for SqrtBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let two = T::one() + T::one();
        let grad_a = binary_kernel(grad_output, &self.a, "sqrt_backward", |g, x| {
            g / (two * x.sqrt())
        })?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

/// Computes the element-wise square root, with gradient tracking.
/// Negative inputs yield NaN; the gradient is undefined at zero.
pub fn sqrt_op<T: Scalar>(a: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = unary_kernel(a, |x| x.sqrt())?;
    if a.requires_grad() {
        record_op(&output, Rc::new(SqrtBackward { a: a.clone() }));
    }
    Ok(output)
}
