// retrograd-core/src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::ops::Add;
use std::rc::Rc;

// --- Backward operations ---

/// Backward rule for element-wise addition: both inputs receive the output
/// gradient unchanged.
#[derive(Debug)]
struct AddBackward<T: Scalar> {
    a: Tensor<T>,
    b: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for AddBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        Ok(vec![grad_output.clone(), grad_output.clone()])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Backward rule for scalar addition: the tensor input receives the output
/// gradient unchanged.
#[derive(Debug)]
struct AddScalarBackward<T: Scalar> {
    a: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for AddScalarBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        Ok(vec![grad_output.clone()])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

// --- Forward operations ---

/// Element-wise addition of two same-shaped tensors, with gradient tracking.
pub fn add_op<T: Scalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = binary_kernel(a, b, "add_op", |x, y| x + y)?;
    if a.requires_grad() || b.requires_grad() {
        record_op(
            &output,
            Rc::new(AddBackward {
                a: a.clone(),
                b: b.clone(),
            }),
        );
    }
    Ok(output)
}

/// Adds a scalar to every element, with gradient tracking.
pub fn add_scalar_op<T: Scalar>(a: &Tensor<T>, value: T) -> Result<Tensor<T>, RetrogradError> {
    let output = unary_kernel(a, |x| x + value)?;
    if a.requires_grad() {
        record_op(&output, Rc::new(AddScalarBackward { a: a.clone() }));
    }
    Ok(output)
}

/// Operator sugar; panics on shape mismatch. Use `add_op` for the fallible form.
impl<'a, 'b, T: Scalar> Add<&'b Tensor<T>> for &'a Tensor<T> {
    type Output = Tensor<T>;

    fn add(self, rhs: &'b Tensor<T>) -> Tensor<T> {
        add_op(self, rhs).expect("tensor addition failed")
    }
}

// --- Tests ---

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
