// retrograd-core/src/autograd/grad_check.rs

use crate::error::RetrogradError;
use crate::ops::binary_kernel;
use crate::tensor::Tensor;
use crate::types::Scalar;
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical:?} != numerical {numerical:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(RetrogradError),

    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(RetrogradError),

    #[error("Input {input_index} requires grad but has no gradient after the backward pass.")]
    MissingAnalyticalGrad { input_index: usize },

    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}.")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}.")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
    },

    #[error("Gradient check inputs must be leaf tensors (input {input_index}).")]
    InputNotLeaf { input_index: usize },

    #[error("Function did not propagate requires_grad to its output.")]
    RequiresGradPropagationError,

    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] RetrogradError),
}

/// Checks analytical gradients against numerical gradients obtained by
/// central finite differences.
///
/// `func` is evaluated once with the given `inputs` and differentiated with
/// `output_grad` as the seed; each element of every gradient-requiring input
/// is then perturbed by `±epsilon` and the weighted loss
/// `sum(output * output_grad)` re-evaluated. The analytical and numerical
/// derivatives must agree within `tolerance` (absolute or relative).
pub fn check_grad<T, F>(
    func: F,
    inputs: &[Tensor<T>],
    output_grad: &Tensor<T>,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    T: Scalar,
    F: Fn(&[Tensor<T>]) -> Result<Tensor<T>, RetrogradError>,
{
    let epsilon_t = T::from(epsilon).ok_or_else(|| {
        GradCheckError::TensorError(RetrogradError::InternalError(
            "epsilon does not fit the element type".to_string(),
        ))
    })?;

    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    // --- Analytical gradients ---
    for input in inputs.iter() {
        if input.requires_grad() {
            input.clear_grad();
        }
    }
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;

    let any_input_requires_grad = inputs.iter().any(|t| t.requires_grad());
    if any_input_requires_grad && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    if output.requires_grad() {
        output
            .backward(Some(output_grad))
            .map_err(GradCheckError::BackwardPassError)?;
    }

    // --- Numerical gradients, element by element ---
    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical_tensor = input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?;
        let analytical: Vec<f64> = analytical_tensor
            .data()
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect();

        let base = input.data();
        let shape = input.shape();

        for element_index in 0..base.len() {
            let loss_plus =
                perturbed_loss(&func, inputs, i, &base, &shape, element_index, epsilon_t, output_grad)?;
            let loss_minus =
                perturbed_loss(&func, inputs, i, &base, &shape, element_index, -epsilon_t, output_grad)?;
            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);

            if numerical.is_nan() || numerical.is_infinite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index,
                });
            }
            let analytical_value = analytical[element_index];
            if analytical_value.is_nan() || analytical_value.is_infinite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index,
                });
            }

            if !relative_eq!(
                analytical_value,
                numerical,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index,
                    analytical: analytical_value,
                    numerical,
                    difference: (analytical_value - numerical).abs(),
                });
            }
        }
    }

    Ok(())
}

/// Re-evaluates `func` with one element of one input nudged by `delta` and
/// returns the weighted scalar loss.
#[allow(clippy::too_many_arguments)]
fn perturbed_loss<T, F>(
    func: &F,
    inputs: &[Tensor<T>],
    target: usize,
    base: &[T],
    shape: &[usize],
    element_index: usize,
    delta: T,
    output_grad: &Tensor<T>,
) -> Result<f64, GradCheckError>
where
    T: Scalar,
    F: Fn(&[Tensor<T>]) -> Result<Tensor<T>, RetrogradError>,
{
    let mut data = base.to_vec();
    data[element_index] = data[element_index] + delta;
    let perturbed = Tensor::new(data, shape.to_vec())?;

    let mut call_inputs: Vec<Tensor<T>> = inputs.to_vec();
    call_inputs[target] = perturbed;

    let output = func(&call_inputs).map_err(GradCheckError::ForwardPassError)?;
    weighted_loss(&output, output_grad)
}

/// Scalar loss used on the numerical side: `sum(output * output_grad)`,
/// computed with non-recording kernels.
fn weighted_loss<T: Scalar>(
    output: &Tensor<T>,
    output_grad: &Tensor<T>,
) -> Result<f64, GradCheckError> {
    let weighted = binary_kernel(output, output_grad, "grad_check_loss", |o, g| o * g)?;
    let total: T = weighted.data().into_iter().sum();
    Ok(total.to_f64().unwrap_or(f64::NAN))
}
