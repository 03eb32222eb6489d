// retrograd-core/src/ops/arithmetic/pow.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

/// Backward rule for `z = a^n` with scalar exponent `n`:
/// dL/da = dL/dz * n * a^(n-1).
#[derive(Debug)]
struct PowBackward<T: Scalar> {
    a: Tensor<T>,
    exponent: T,
}

impl<T: Scalar> BackwardOp<T> for PowBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let exponent = self.exponent;
        let grad_a = binary_kernel(grad_output, &self.a, "pow_backward", |g, x| {
            g * exponent * x.powf(exponent - T::one())
        })?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

/// Raises every element to a scalar power, with gradient tracking.
pub fn pow_op<T: Scalar>(a: &Tensor<T>, exponent: T) -> Result<Tensor<T>, RetrogradError> {
    let output = unary_kernel(a, |x| x.powf(exponent))?;
    if a.requires_grad() {
        record_op(
            &output,
            Rc::new(PowBackward {
                a: a.clone(),
                exponent,
            }),
        );
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ones;
    use approx::assert_relative_eq;

    #[test]
    fn test_pow_forward() {
        let a = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![3]).unwrap();
        let result = pow_op(&a, 2.0).unwrap();
        assert_eq!(result.data(), vec![1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_pow_backward() {
        let a = Tensor::new(vec![1.0f64, 2.0, 3.0], vec![3]).unwrap();
        a.requires_grad_(true).unwrap();
        let result = pow_op(&a, 3.0).unwrap();
        result.backward(Some(&ones::<f64>(&[3]).unwrap())).unwrap();

        // d(a^3)/da = 3a^2
        let grad = a.grad().expect("grad missing").data();
        assert_relative_eq!(grad[0], 3.0);
        assert_relative_eq!(grad[1], 12.0);
        assert_relative_eq!(grad[2], 27.0);
    }

    #[test]
    fn test_pow_fractional_exponent() {
        let a = Tensor::new(vec![4.0f64], vec![1]).unwrap();
        a.requires_grad_(true).unwrap();
        let result = pow_op(&a, 0.5).unwrap();
        assert_relative_eq!(result.data()[0], 2.0);

        result.backward(Some(&ones::<f64>(&[1]).unwrap())).unwrap();
        // d(sqrt(a))/da = 1 / (2 sqrt(a)) = 0.25
        assert_relative_eq!(a.grad().expect("grad missing").data()[0], 0.25);
    }
}
