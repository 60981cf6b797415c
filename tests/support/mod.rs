//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point2;
use solid_profile::{Profile, float_types::Real};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Asserts every point of `a` lies within `eps` of the same index in `b`.
pub fn assert_points_eq(a: &Profile, b: &Profile, eps: Real) {
    for (i, (p, q)) in a.points().iter().zip(b.points()).enumerate() {
        assert!(
            (p - q).norm() < eps,
            "point {i} differs: {p} vs {q} (eps {eps})"
        );
    }
}

pub fn point(x: Real, y: Real) -> Point2<Real> {
    Point2::new(x, y)
}
