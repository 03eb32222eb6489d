// retrograd-core/src/ops/reduction/mean.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::record_op;
use crate::tensor::create::full;
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

fn numel_as<T: Scalar>(numel: usize) -> Result<T, RetrogradError> {
    T::from(numel).ok_or_else(|| {
        RetrogradError::InternalError(format!(
            "element count {} does not fit the element type",
            numel
        ))
    })
}

/// Backward rule for the full-tensor mean: the scalar output gradient is
/// divided by the element count and broadcast over the input's shape.
#[derive(Debug)]
struct MeanBackward<T: Scalar> {
    a: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for MeanBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let count = numel_as::<T>(self.a.numel())?;
        let seed = grad_output.item()? / count;
        let grad_a = full(&self.a.shape(), seed)?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

/// Averages all elements into a scalar tensor, with gradient tracking.
///
/// # Errors
/// Returns `RetrogradError::UnsupportedOperation` for an empty tensor, whose
/// mean is undefined.
pub fn mean_op<T: Scalar>(a: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let (total, numel) = {
        let guard = a.read_data();
        if guard.numel() == 0 {
            return Err(RetrogradError::UnsupportedOperation(
                "mean of an empty tensor is undefined".to_string(),
            ));
        }
        (guard.data.iter().copied().sum::<T>(), guard.numel())
    };
    let output = Tensor::new(vec![total / numel_as::<T>(numel)?], vec![])?;
    if a.requires_grad() {
        record_op(&output, Rc::new(MeanBackward { a: a.clone() }));
    }
    Ok(output)
}
