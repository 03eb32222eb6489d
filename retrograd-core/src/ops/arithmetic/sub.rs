// retrograd-core/src/ops/arithmetic/sub.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::ops::Sub;
use std::rc::Rc;

/// Backward rule for element-wise subtraction: the left input receives the
/// output gradient, the right input its negation.
#[derive(Debug)]
struct SubBackward<T: Scalar> {
    a: Tensor<T>,
    b: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for SubBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let grad_b = unary_kernel(grad_output, |g| -g)?;
        Ok(vec![grad_output.clone(), grad_b])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise subtraction of two same-shaped tensors, with gradient tracking.
pub fn sub_op<T: Scalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = binary_kernel(a, b, "sub_op", |x, y| x - y)?;
    if a.requires_grad() || b.requires_grad() {
        record_op(
            &output,
            Rc::new(SubBackward {
                a: a.clone(),
                b: b.clone(),
            }),
        );
    }
    Ok(output)
}

/// Operator sugar; panics on shape mismatch. Use `sub_op` for the fallible form.
impl<'a, 'b, T: Scalar> Sub<&'b Tensor<T>> for &'a Tensor<T> {
    type Output = Tensor<T>;

    fn sub(self, rhs: &'b Tensor<T>) -> Tensor<T> {
        sub_op(self, rhs).expect("tensor subtraction failed")
    }
}
