// retrograd-core/src/ops/reduction/sum.rs

use crate::autograd::BackwardOp;
use crate::error::RetrogradError;
use crate::ops::record_op;
use crate::tensor::create::full;
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::rc::Rc;

/// Backward rule for the full-tensor sum: the scalar output gradient is
/// broadcast back over the input's shape.
#[derive(Debug)]
struct SumBackward<T: Scalar> {
    a: Tensor<T>,
}

impl<T: Scalar> BackwardOp<T> for SumBackward<T> {
    fn backward(&self, grad_output: &Tensor<T>) -> Result<Vec<Tensor<T>>, RetrogradError> {
        let seed = grad_output.item()?;
        let grad_a = full(&self.a.shape(), seed)?;
        Ok(vec![grad_a])
    }

    fn inputs(&self) -> Vec<Tensor<T>> {
        vec![self.a.clone()]
    }
}

/// Sums all elements into a scalar tensor, with gradient tracking.
pub fn sum_op<T: Scalar>(a: &Tensor<T>) -> Result<Tensor<T>, RetrogradError> {
    let total: T = {
        let guard = a.read_data();
        guard.data.iter().copied().sum()
    };
    let output = Tensor::new(vec![total], vec![])?;
    if a.requires_grad() {
        record_op(&output, Rc::new(SumBackward { a: a.clone() }));
    }
    Ok(output)
}

// --- Tests ---

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
