//! The planar rotation primitive every bend and tilt in the profile pipeline
//! is built from.

use crate::float_types::{FULL_TURN_DEG, Real};
use nalgebra::Point2;

/// **Mathematical Foundation: Rotation About an Arbitrary Pivot**
///
/// Rotates `point` about `pivot` by `angle_deg` degrees, counter-clockwise
/// positive in a Y-up frame. Callers choose the sign for their own angle
/// semantics (the profile pipeline negates every user angle).
///
/// ## **Polar Round Trip**
/// ```text
/// r  = |point − pivot|
/// φ  = atan2(point.y − pivot.y, point.x − pivot.x) + angle
/// p' = pivot + r·(cos φ, sin φ)
/// ```
///
/// ## **Exact Cases**
/// - `angle_deg ≡ 0 (mod 360)`: `point` is returned bit-for-bit, no trip
///   through polar form.
/// - `point == pivot`: the pivot is returned; `atan2(0, 0)` is never evaluated.
///
/// # Example
/// ```
/// # use nalgebra::Point2;
/// # use solid_profile::rotation::rotate_point;
/// let p = rotate_point(Point2::new(1.0, 1.0), Point2::new(2.0, 1.0), 90.0);
/// assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn rotate_point(pivot: Point2<Real>, point: Point2<Real>, angle_deg: Real) -> Point2<Real> {
    if angle_deg % FULL_TURN_DEG == 0.0 {
        return point;
    }

    let offset = point - pivot;
    let radius = offset.norm();
    if radius == 0.0 {
        return pivot;
    }

    let theta = offset.y.atan2(offset.x).to_degrees() + angle_deg;
    let (sin, cos) = theta.to_radians().sin_cos();
    Point2::new(pivot.x + cos * radius, pivot.y + sin * radius)
}

/// Rotates every point of `points` whose index lies in `indices` about `pivot`.
pub(crate) fn rotate_indices(
    points: &mut [Point2<Real>],
    indices: impl IntoIterator<Item = usize>,
    pivot: Point2<Real>,
    angle_deg: Real,
) {
    for index in indices {
        points[index] = rotate_point(pivot, points[index], angle_deg);
    }
}
