//! Validation errors
//!
//! The profile generator itself is total and never returns these; they are
//! produced by the caller-side checks ([`ParameterSet::validate`],
//! [`Profile::validate`]) and by the revolve adapter.
//!
//! [`ParameterSet::validate`]: crate::parameters::ParameterSet::validate
//! [`Profile::validate`]: crate::profile::Profile::validate

use crate::float_types::Real;
use crate::parameters::ParameterKind;
use nalgebra::Point2;

/// Problems with a parameter vector, reported before it reaches the generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// (NonFinite) The slot holds a NaN or infinite value
    #[error("(NonFinite) {kind} is not a finite number: {value}")]
    NonFinite { kind: ParameterKind, value: Real },
    /// (OutOfRange) The slot lies outside its configured [min, max]
    #[error("(OutOfRange) {kind} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        kind: ParameterKind,
        value: Real,
        min: Real,
        max: Real,
    },
    /// (OffStep) The slot is not a whole number of steps above its minimum
    #[error("(OffStep) {kind} = {value} is not on the {step} step grid starting at {min}")]
    OffStep {
        kind: ParameterKind,
        value: Real,
        min: Real,
        step: Real,
    },
    /// (SingularAngle) A bend angle whose secant compensation is undefined
    #[error("(SingularAngle) {kind} = {value}° must lie strictly inside (-90°, 90°)")]
    SingularAngle { kind: ParameterKind, value: Real },
}

/// Problems with a generated profile or with a request built from it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) Point {index} ({point}) has a NaN or infinite coordinate")]
    InvalidCoordinate { index: usize, point: Point2<Real> },
    /// (SelfIntersection) Two non-adjacent control segments cross
    #[error("(SelfIntersection) Segment {first:?} crosses segment {second:?} at: {point}")]
    SelfIntersection {
        first: (usize, usize),
        second: (usize, usize),
        point: Point2<Real>,
    },
    /// (TooFewSegments) A revolution needs at least two segments
    #[error("(TooFewSegments) Revolve requires at least {min} segments, got {got}")]
    TooFewSegments { got: usize, min: usize },
}
