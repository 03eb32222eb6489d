use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;
use std::iter::Sum;

/// A trait representing the element types usable in retrograd tensors.
///
/// This bounds the types (`f32`, `f64`) that can flow through the generic
/// kernels of the differentiable operations. `Float` brings the usual
/// arithmetic, comparisons, `zero()`/`one()` and elementary functions;
/// `NumAssignOps` brings the compound-assignment forms needed by in-place
/// gradient accumulation.
pub trait Scalar:
    Float
    + NumAssignOps
    + Sum<Self>
    + Debug
    + 'static
{
}

// The compiler checks that f32/f64 satisfy all the bounds of Scalar.
impl Scalar for f32 {}
impl Scalar for f64 {}
