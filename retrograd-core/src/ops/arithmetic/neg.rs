// retrograd-core/src/ops/arithmetic/neg.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::{record_op, unary_kernel};
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::ops::Neg;
use std::rc::Rc;

/// Backward rule for negation: the input receives the negated output gradient.
#[derive(Debug)]
struct NegBackward<T: Scalar> {
    a: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for NegBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let grad_a = unary_kernel(grad_output, |g| -g)?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

/// Element-wise negation, with gradient tracking.
pub fn neg_op<T: Scalar>(a: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let output = unary_kernel(a, |x| -x)?;
    if a.requires_grad() {
        record_op(&output, Rc::new(NegBackward { a: a.clone() }));
    }
    Ok(output)
}

/// Operator sugar for `-&tensor`.
impl<'a, T: Scalar> Neg for &'a Tensor<T> {
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        neg_op(self).expect("tensor negation failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ones;

    #[test]
    fn test_neg_forward() {
        let a = Tensor::new(vec![1.0f32, -2.0, 0.0], vec![3]).unwrap();
        let result = neg_op(&a).unwrap();
        assert_eq!(result.data(), vec![-1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_neg_backward() {
        let a = Tensor::new(vec![1.0f32, -2.0], vec![2]).unwrap();
        a.requires_grad_(true).unwrap();
        let result = neg_op(&a).unwrap();
        result.backward(Some(&ones::<f32>(&[2]).unwrap())).unwrap();

        assert_eq!(a.grad().expect("grad missing").data(), vec![-1.0, -1.0]);
    }

    #[test]
    fn test_neg_operator_sugar() {
        let a = Tensor::new(vec![3.0f64], vec![1]).unwrap();
        assert_eq!((-&a).data(), vec![-3.0]);
    }
}
