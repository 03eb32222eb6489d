// retrograd-core/src/ops/math_elem/ln.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

/// Backward rule for the natural logarithm `z = ln(a)`: dL/da = dL/dz / a.
/// The original input is kept because its value appears in the gradient.
#[derive(Debug)]
struct LnBackward<T: Scalar> {
    a: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for LnBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let grad_a = binary_kernel(grad_output, &self.a, "ln_backward", |g, x| g / x)?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

/// Computes the element-wise natural logarithm, with gradient tracking.
///
/// The logarithm is only defined for strictly positive values; non-positive
/// inputs yield NaN (or negative infinity at zero) per IEEE float semantics,
/// and the gradient `1/x` is likewise undefined at zero.
pub fn ln_op<T: Scalar>(a: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = unary_kernel(a, |x| x.ln())?;
    if a.requires_grad() {
        record_op(&output, Rc::new(LnBackward { a: a.clone() }));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ones;
    use approx::assert_relative_eq;

    #[test]
    fn test_ln_forward() {
        let a = Tensor::new(vec![1.0f64, std::f64::consts::E], vec![2]).unwrap();
        let result = ln_op(&a).unwrap();
        let data = result.data();
        assert_relative_eq!(data[0], 0.0);
        assert_relative_eq!(data[1], 1.0);
    }

    #[test]
    fn test_ln_backward() {
        let a = Tensor::new(vec![1.0f64, 4.0], vec![2]).unwrap();
        a.requires_grad_(true).unwrap();
        let result = ln_op(&a).unwrap();
        result.backward(Some(&ones::<f64>(&[2]).unwrap())).unwrap();

        let grad = a.grad().expect("grad missing").data();
        assert_relative_eq!(grad[0], 1.0);
        assert_relative_eq!(grad[1], 0.25);
    }

    #[test]
    fn test_ln_of_non_positive_is_nan() {
        let a = Tensor::new(vec![-1.0f32], vec![1]).unwrap();
        let result = ln_op(&a).unwrap();
        assert!(result.data()[0].is_nan());
    }
}
