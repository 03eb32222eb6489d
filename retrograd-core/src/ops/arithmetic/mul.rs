// retrograd-core/src/ops/arithmetic/mul.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::ops::Mul;
use std::rc::Rc;

// --- Backward operations ---

/// Backward rule for element-wise multiplication `z = a * b`:
/// dL/da = dL/dz * b and dL/db = dL/dz * a, so both input values are kept.
#[derive(Debug)]
struct MulBackward<T: Scalar> {
    a: Tensor<T>,
    b: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for MulBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let grad_a = binary_kernel(grad_output, &self.b, "mul_backward", |g, y| g * y)?;
        let grad_b = binary_kernel(grad_output, &self.a, "mul_backward", |g, x| g * x)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Backward rule for scalar multiplication `z = a * c`: dL/da = dL/dz * c.
#[derive(Debug)]
struct MulScalarBackward<T: Scalar> {
    a: Tensor<T>,
    value: T,
}

impl<T: Scalar> BackwardOp<T> for MulScalarBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let value = self.value;
        let grad_a = unary_kernel(grad_output, |g| g * value)?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

// --- Forward operations ---

/// Element-wise multiplication of two same-shaped tensors, with gradient
/// tracking.
pub fn mul_op<T: Scalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = binary_kernel(a, b, "mul_op", |x, y| x * y)?;
    if a.requires_grad() || b.requires_grad() {
        record_op(
            &output,
            Rc::new(MulBackward {
                a: a.clone(),
                b: b.clone(),
            }),
        );
    }
    Ok(output)
}

/// Multiplies every element by a scalar, with gradient tracking.
pub fn mul_scalar_op<T: Scalar>(a: &Tensor<T>, value: T) -> Result<Tensor<T>, RetrogradError> {
    let output = unary_kernel(a, |x| x * value)?;
    if a.requires_grad() {
        record_op(
            &output,
            Rc::new(MulScalarBackward {
                a: a.clone(),
                value,
            }),
        );
    }
    Ok(output)
}

/// Operator sugar; panics on shape mismatch. Use `mul_op` for the fallible form.
impl<'a, 'b, T: Scalar> Mul<&'b Tensor<T>> for &'a Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, rhs: &'b Tensor<T>) -> Tensor<T> {
        mul_op(self, rhs).expect("tensor multiplication failed")
    }
}

/// Scalar operator sugar: `&t * 2.0`.
impl<'a, T: Scalar> Mul<T> for &'a Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, rhs: T) -> Tensor<T> {
        mul_scalar_op(self, rhs).expect("scalar multiplication failed")
    }
}

// --- Tests ---

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
