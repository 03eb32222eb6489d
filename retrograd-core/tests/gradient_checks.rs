use retrograd_core::autograd::grad_check::check_grad;
use retrograd_core::tensor::{ones, randn, uniform};
use retrograd_core::Tensor;

mod common;
use common::tracked_leaf;

#[test]
fn test_check_grad_polynomial() {
    // f(x) = sum(x^3 - 2x)
    let x = tracked_leaf(vec![0.5f64, -1.2, 2.0, 3.3], vec![4]);
    check_grad(
        |inputs: &[Tensor<f64>]| {
            let cubed = inputs[0].pow(3.0)?;
            let scaled = inputs[0].mul_scalar(2.0)?;
            cubed.sub(&scaled)?.sum()
        },
        &[x],
        &ones::<f64>(&[]).unwrap(),
        1e-6,
        1e-5,
    )
    .unwrap();
}

#[test]
fn test_check_grad_rational_on_random_inputs() {
    // f(a, b) = sum(a / b) on shifted-positive random data.
    let a = randn::<f64>(&[6]).unwrap();
    a.requires_grad_(true).unwrap();
    // Shift denominators away from zero; no grad was recorded on the shift,
    // so the result is still a leaf.
    let b = uniform::<f64>(&[6]).unwrap().add_scalar(1.0).unwrap();
    b.requires_grad_(true).unwrap();

    check_grad(
        |inputs: &[Tensor<f64>]| inputs[0].div(&inputs[1])?.sum(),
        &[a, b],
        &ones::<f64>(&[]).unwrap(),
        1e-6,
        1e-5,
    )
    .unwrap();
}

#[test]
fn test_check_grad_norm_with_covector_seed() {
    let x = tracked_leaf(vec![1.0f64, -2.0, 3.0], vec![3]);
    check_grad(
        |inputs: &[Tensor<f64>]| inputs[0].norm(),
        &[x],
        // Non-unit seed on the scalar output.
        &Tensor::new(vec![0.7f64], vec![]).unwrap(),
        1e-6,
        1e-5,
    )
    .unwrap();
}

#[test]
fn test_check_grad_mean_of_exp() {
    let x = tracked_leaf(vec![0.1f64, 0.2, -0.3, 0.4], vec![2, 2]);
    check_grad(
        |inputs: &[Tensor<f64>]| inputs[0].exp()?.mean(),
        &[x],
        &ones::<f64>(&[]).unwrap(),
        1e-6,
        1e-5,
    )
    .unwrap();
}
