// retrograd-core/src/tensor/ops_methods.rs
//
// Method-form wrappers over the operation functions in `crate::ops`, so
// expressions read fluently: `x.mul(&y)?.sum()?.backward(None)?`.

use crate::error::RetrogradError;
use crate::ops::arithmetic::{
    add_op, add_scalar_op, div_op, mul_op, mul_scalar_op, neg_op, pow_op, sub_op,
};
use crate::ops::linalg::dot_op;
use crate::ops::math_elem::{exp_op, ln_op, sqrt_op};
use crate::ops::reduction::{mean_op, sum_op};
use crate::tensor::Tensor;
use crate::types::Scalar;

impl<T: Scalar> Tensor<T> {
    /// Element-wise addition. See [`add_op`].
    pub fn add(&self, other: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
        add_op(self, other)
    }

    /// Element-wise subtraction. See [`sub_op`].
    pub fn sub(&self, other: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
        sub_op(self, other)
    }

    /// Element-wise multiplication. See [`mul_op`].
    pub fn mul(&self, other: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
        mul_op(self, other)
    }

    /// Element-wise division. See [`div_op`].
    pub fn div(&self, other: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
        div_op(self, other)
    }

    /// Element-wise negation. See [`neg_op`].
    pub fn neg(&self) -> Result<Tensor<T>, RetrogradError> {
        neg_op(self)
    }

    /// Adds a scalar to every element. See [`add_scalar_op`].
    pub fn add_scalar(&self, value: T) -> Result<Tensor<T>, RetrogradError> {
        add_scalar_op(self, value)
    }

    /// Multiplies every element by a scalar. See [`mul_scalar_op`].
    pub fn mul_scalar(&self, value: T) -> Result<Tensor<T>, RetrogradError> {
        mul_scalar_op(self, value)
    }

    /// Raises every element to a scalar power. See [`pow_op`].
    pub fn pow(&self, exponent: T) -> Result<Tensor<T>, RetrogradError> {
        pow_op(self, exponent)
    }

    /// Element-wise exponential. See [`exp_op`].
    pub fn exp(&self) -> Result<Tensor<T>, RetrogradError> {
        exp_op(self)
    }

    /// Element-wise natural logarithm. See [`ln_op`].
    pub fn ln(&self) -> Result<Tensor<T>, RetrogradError> {
        ln_op(self)
    }

    /// Element-wise square root. See [`sqrt_op`].
    pub fn sqrt(&self) -> Result<Tensor<T>, RetrogradError> {
        sqrt_op(self)
    }

    /// Sum of all elements as a scalar tensor. See [`sum_op`].
    pub fn sum(&self) -> Result<Tensor<T>, RetrogradError> {
        sum_op(self)
    }

    /// Mean of all elements as a scalar tensor. See [`mean_op`].
    pub fn mean(&self) -> Result<Tensor<T>, RetrogradError> {
        mean_op(self)
    }

    /// Dot product with another 1-D tensor. See [`dot_op`].
    pub fn dot(&self, other: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
        dot_op(self, other)
    }

    /// Euclidean (L2) norm as a scalar tensor.
    ///
    /// Composed from recorded operations (square, sum, square root), so its
    /// derivative flows through the graph like any other expression.
    pub fn norm(&self) -> Result<Tensor<T>, RetrogradError> {
        let squared = mul_op(self, self)?;
        let total = sum_op(&squared)?;
        sqrt_op(&total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_method_chaining() {
        let x = Tensor::new(vec![1.0f64, 2.0, 3.0], vec![3]).unwrap();
        let y = x.mul_scalar(2.0).unwrap().add_scalar(1.0).unwrap();
        assert_eq!(y.data(), vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_norm_value() {
        let x = Tensor::new(vec![3.0f64, 4.0], vec![2]).unwrap();
        let n = x.norm().unwrap();
        assert_relative_eq!(n.item().unwrap(), 5.0);
    }

    #[test]
    fn test_norm_gradient() {
        // d||x|| / dx = x / ||x||
        let x = Tensor::new(vec![3.0f64, 4.0], vec![2]).unwrap();
        x.requires_grad_(true).unwrap();
        let n = x.norm().unwrap();
        n.backward(None).unwrap();

        let grad = x.grad().expect("grad missing").data();
        assert_relative_eq!(grad[0], 0.6);
        assert_relative_eq!(grad[1], 0.8);
    }
}
