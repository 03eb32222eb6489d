use super::*;
use approx::assert_relative_eq;

#[test]
fn test_sum_forward_scalar_shape() {
    let t = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let result = sum_op(&t).unwrap();
    assert_eq!(result.shape(), Vec::<usize>::new());
    assert_relative_eq!(result.item().unwrap(), 21.0);
}

#[test]
fn test_sum_empty_tensor() {
    let t = Tensor::new(Vec::<f32>::new(), vec![0]).unwrap();
    let result = sum_op(&t).unwrap();
    assert_relative_eq!(result.item().unwrap(), 0.0);
}

#[test]
fn test_sum_backward_is_ones() {
    let x = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![4]).unwrap();
    x.requires_grad_(true).unwrap();
    let y = sum_op(&x).unwrap();
    assert!(y.requires_grad());

    y.backward(None).unwrap();
    assert_eq!(
        x.grad().expect("grad missing").data(),
        vec![1.0, 1.0, 1.0, 1.0]
    );
}

#[test]
fn test_sum_backward_scales_with_seed() {
    let x = Tensor::new(vec![1.0f64, 2.0], vec![2]).unwrap();
    x.requires_grad_(true).unwrap();
    let y = sum_op(&x).unwrap();

    let seed = Tensor::new(vec![2.5f64], vec![]).unwrap();
    y.backward(Some(&seed)).unwrap();
    assert_eq!(x.grad().expect("grad missing").data(), vec![2.5, 2.5]);
}
