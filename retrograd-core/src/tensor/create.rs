// retrograd-core/src/tensor/create.rs

use crate::error::RetrogradError;
use crate::tensor::Tensor;
use crate::types::Scalar;
use rand::distributions::{Distribution, Standard};
use rand_distr::StandardNormal;

/// Creates a new leaf tensor filled with zeros with the specified shape.
pub fn zeros<T: Scalar>(shape: &[usize]) -> Result<Tensor<T>, RetrogradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![T::zero(); numel], shape.to_vec())
}

/// Creates a new leaf tensor filled with ones with the specified shape.
pub fn ones<T: Scalar>(shape: &[usize]) -> Result<Tensor<T>, RetrogradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![T::one(); numel], shape.to_vec())
}

/// Creates a new leaf tensor filled with a specific value.
pub fn full<T: Scalar>(shape: &[usize], value: T) -> Result<Tensor<T>, RetrogradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new leaf tensor from a `Vec` and shape.
pub fn from_vec<T: Scalar>(data: Vec<T>, shape: Vec<usize>) -> Result<Tensor<T>, RetrogradError> {
    Tensor::new(data, shape)
}

/// Creates a zeros tensor with the same shape as the input tensor.
pub fn zeros_like<T: Scalar>(tensor: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    zeros(&tensor.shape())
}

/// Creates a ones tensor with the same shape as the input tensor.
pub fn ones_like<T: Scalar>(tensor: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    ones(&tensor.shape())
}

/// Creates a 1-D tensor of evenly stepped values in `[start, end)`.
pub fn arange<T: Scalar>(start: T, end: T, step: T) -> Result<Tensor<T>, RetrogradError> {
    if (end > start && step <= T::zero())
        || (end < start && step >= T::zero())
        || step == T::zero()
    {
        return Err(RetrogradError::UnsupportedOperation(format!(
            "Invalid step {:?} for arange({:?}, {:?})",
            step, start, end
        )));
    }
    let mut data_vec = Vec::new();
    let mut value = start;
    while (step > T::zero() && value < end) || (step < T::zero() && value > end) {
        data_vec.push(value);
        value = value + step;
    }
    let numel = data_vec.len();
    Tensor::new(data_vec, vec![numel])
}

/// Creates a 1-D tensor of `steps` values evenly spaced from `start` to `end`
/// inclusive.
pub fn linspace<T: Scalar>(start: T, end: T, steps: usize) -> Result<Tensor<T>, RetrogradError> {
    if steps < 2 {
        return Err(RetrogradError::UnsupportedOperation(
            "linspace requires at least 2 steps".to_string(),
        ));
    }
    let denom = T::from(steps - 1).ok_or_else(|| {
        RetrogradError::InternalError("linspace step count does not fit the element type".to_string())
    })?;
    let step_size = (end - start) / denom;
    let mut data_vec = Vec::with_capacity(steps);
    let mut value = start;
    for _ in 0..steps {
        data_vec.push(value);
        value = value + step_size;
    }
    Tensor::new(data_vec, vec![steps])
}

/// Creates a leaf tensor sampled from the standard normal distribution.
pub fn randn<T>(shape: &[usize]) -> Result<Tensor<T>, RetrogradError>
where
    T: Scalar,
    StandardNormal: Distribution<T>,
{
    let mut rng = rand::thread_rng();
    let numel = shape.iter().product();
    let data_vec: Vec<T> = (0..numel).map(|_| StandardNormal.sample(&mut rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Creates a leaf tensor sampled uniformly from `[0, 1)`.
pub fn uniform<T>(shape: &[usize]) -> Result<Tensor<T>, RetrogradError>
where
    T: Scalar,
    Standard: Distribution<T>,
{
    let mut rng = rand::thread_rng();
    let numel = shape.iter().product();
    let data_vec: Vec<T> = (0..numel).map(|_| Standard.sample(&mut rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}
