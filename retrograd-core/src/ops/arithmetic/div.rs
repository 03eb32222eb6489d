// retrograd-core/src/ops/arithmetic/div.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::ops::Div;
use std::rc::Rc;

/// Backward rule for element-wise division `z = a / b`:
/// dL/da = dL/dz / b and dL/db = -dL/dz * a / b^2.
#[derive(Debug)]
struct DivBackward<T: Scalar> {
    a: Tensor<T>,
    b: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for DivBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let grad_a = binary_kernel(grad_output, &self.b, "div_backward", |g, y| g / y)?;
        let numerator = binary_kernel(grad_output, &self.a, "div_backward", |g, x| g * x)?;
        let grad_b = binary_kernel(&numerator, &self.b, "div_backward", |n, y| -(n / (y * y)))?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise division of two same-shaped tensors, with gradient tracking.
/// Division by zero follows IEEE float semantics (infinities, NaN).
pub fn div_op<T: Scalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = binary_kernel(a, b, "div_op", |x, y| x / y)?;
    if a.requires_grad() || b.requires_grad() {
        record_op(
            &output,
            Rc::new(DivBackward {
                a: a.clone(),
                b: b.clone(),
            }),
        );
    }
    Ok(output)
}

/// Operator sugar; panics on shape mismatch. Use `div_op` for the fallible form.
impl<'a, 'b, T: Scalar> Div<&'b Tensor<T>> for &'a Tensor<T> {
    type Output = Tensor<T>;

    fn div(self, rhs: &'b Tensor<T>) -> Tensor<T> {
        div_op(self, rhs).expect("tensor division failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ones;
    use approx::assert_relative_eq;

    #[test]
    fn test_div_forward() {
        let a = Tensor::new(vec![6.0f32, 8.0], vec![2]).unwrap();
        let b = Tensor::new(vec![2.0f32, 4.0], vec![2]).unwrap();
        let result = div_op(&a, &b).unwrap();
        assert_eq!(result.data(), vec![3.0, 2.0]);
    }

    #[test]
    fn test_div_backward() {
        let a = Tensor::new(vec![6.0f64, 8.0], vec![2]).unwrap();
        a.requires_grad_(true).unwrap();
        let b = Tensor::new(vec![2.0f64, 4.0], vec![2]).unwrap();
        b.requires_grad_(true).unwrap();

        let result = div_op(&a, &b).unwrap();
        result.backward(Some(&ones::<f64>(&[2]).unwrap())).unwrap();

        let grad_a = a.grad().expect("grad a missing").data();
        assert_relative_eq!(grad_a[0], 1.0 / 2.0);
        assert_relative_eq!(grad_a[1], 1.0 / 4.0);

        // d(a/b)/db = -a / b^2
        let grad_b = b.grad().expect("grad b missing").data();
        assert_relative_eq!(grad_b[0], -6.0 / 4.0);
        assert_relative_eq!(grad_b[1], -8.0 / 16.0);
    }

    #[test]
    fn test_div_by_zero_is_infinite() {
        let a = Tensor::new(vec![1.0f32], vec![1]).unwrap();
        let b = Tensor::new(vec![0.0f32], vec![1]).unwrap();
        let result = div_op(&a, &b).unwrap();
        assert!(result.data()[0].is_infinite());
    }
}
