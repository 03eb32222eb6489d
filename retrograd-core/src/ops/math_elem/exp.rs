// retrograd-core/src/ops/math_elem/exp.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{binary_kernel, record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

/// Backward rule for the element-wise exponential `z = e^a`:
/// dL/da = dL/dz * e^a. The input is kept and re-exponentiated rather than
/// holding the output, which would create a reference cycle through `grad_fn`.
#[derive(Debug)]
struct ExpBackward<T: Scalar> {
    a: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for ExpBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let grad_a = binary_kernel(grad_output, &self.a, "exp_backward", |g, x| g * x.exp())?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

/// Computes the element-wise exponential, with gradient tracking.
pub fn exp_op<T: Scalar>(a: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = unary_kernel(a, |x| x.exp())?;
    if a.requires_grad() {
        record_op(&output, Rc::new(ExpBackward { a: a.clone() }));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ones;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_forward() {
        let a = Tensor::new(vec![0.0f64, 1.0], vec![2]).unwrap();
        let result = exp_op(&a).unwrap();
        let data = result.data();
        assert_relative_eq!(data[0], 1.0);
        assert_relative_eq!(data[1], std::f64::consts::E);
    }

    #[test]
    fn test_exp_backward() {
        let a = Tensor::new(vec![0.0f64, 2.0], vec![2]).unwrap();
        a.requires_grad_(true).unwrap();
        let result = exp_op(&a).unwrap();
        result.backward(Some(&ones::<f64>(&[2]).unwrap())).unwrap();

        // d(e^a)/da = e^a
        let grad = a.grad().expect("grad missing").data();
        assert_relative_eq!(grad[0], 1.0);
        assert_relative_eq!(grad[1], 2.0f64.exp());
    }
}
