//! The profile pipeline: a fixed sequence of scale, re-anchor and rotation
//! stages turning the template into a profile for one parameter set.
//!
//! Every stage reads the output of the previous one, so the order below is
//! part of the contract:
//!
//! | # | stage                          | touches                        |
//! |---|--------------------------------|--------------------------------|
//! | 1 | height normalization           | every Y                        |
//! | 2 | head width scale (+ guard)     | X of `Head`                    |
//! | 3 | head radial scale              | `HeadInterior`                 |
//! | 4 | shaft radial scale             | shaft controls                 |
//! | 5 | length stretch                 | X of `Head`                    |
//! | 6 | control point re-interpolation | X of shaft controls            |
//! | 7 | curve bend                     | Y of shaft controls            |
//! | 8 | curve bend compensation        | Y of both axis ends            |
//! | 9 | head re-leveling               | `Head`                         |
//! |10 | base bend                      | `Interior`                     |
//! |11 | base bend compensation         | Y of both axis ends            |
//! |12 | tip tilt                       | `Tip`                          |
//! |13 | vertical centering             | every Y                        |
//!
//! Bend angles of ±90° make the secant compensations divide by (nearly) zero;
//! the pipeline does not guard against it and yields huge or non-finite points. Use
//! [`ParameterSet::validate`] before generating when inputs are untrusted.

use crate::config::ShapeConfig;
use crate::float_types::{PI, Real};
use crate::parameters::{ParameterSet, Preset};
use crate::profile::Profile;
use crate::rotation::rotate_indices;
use crate::template::{
    HEAD_BASE_FAR, HEAD_BASE_NEAR, HEAD_MID_FAR, HEAD_MID_NEAR, NECK_FAR, NECK_NEAR, POINT_COUNT,
    RIM, SHAFT_BASE, SHAFT_END, Zone,
};
use nalgebra::Point2;
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type Points = [Point2<Real>; POINT_COUNT];

/// The point-modifying stages of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    HeightNormalization,
    HeadWidthScale,
    HeadRadialScale,
    ShaftRadialScale,
    LengthStretch,
    ControlPointReinterpolation,
    CurveBend,
    CurveBendCompensation,
    HeadReleveling,
    BaseBend,
    BaseBendCompensation,
    TipTilt,
    VerticalCentering,
}

impl Stage {
    pub const ALL: [Stage; 13] = [
        Stage::HeightNormalization,
        Stage::HeadWidthScale,
        Stage::HeadRadialScale,
        Stage::ShaftRadialScale,
        Stage::LengthStretch,
        Stage::ControlPointReinterpolation,
        Stage::CurveBend,
        Stage::CurveBendCompensation,
        Stage::HeadReleveling,
        Stage::BaseBend,
        Stage::BaseBendCompensation,
        Stage::TipTilt,
        Stage::VerticalCentering,
    ];

    /// The bend, compensation and tilt stages; all identities when every angle is zero.
    pub const fn is_rotation(self) -> bool {
        matches!(
            self,
            Stage::CurveBend
                | Stage::CurveBendCompensation
                | Stage::HeadReleveling
                | Stage::BaseBend
                | Stage::BaseBendCompensation
                | Stage::TipTilt
        )
    }
}

/// Factor applied to the head's X extent about the rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadWidthFactor {
    pub factor: Real,
    /// `true` when the height scale would have pushed the neck past the
    /// safety margin and the fallback factor was used instead.
    pub overridden: bool,
}

/// Turns parameter sets into profiles using one [`ShapeConfig`].
///
/// Holds no mutable state; a generator can be shared across threads and
/// every call is independent.
#[derive(Debug, Clone, Copy)]
pub struct ProfileGenerator<'a> {
    config: &'a ShapeConfig,
}

impl Default for ProfileGenerator<'static> {
    fn default() -> Self {
        Self::new(ShapeConfig::standard())
    }
}

impl<'a> ProfileGenerator<'a> {
    pub const fn new(config: &'a ShapeConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &'a ShapeConfig {
        self.config
    }

    /// Generates the profile for `params`. Parameters are not range checked.
    #[instrument(level = "trace", skip(self))]
    pub fn generate(&self, params: &ParameterSet) -> Profile {
        self.run(params, |_, _| {})
    }

    /// Generates the profile and returns a snapshot after every stage.
    ///
    /// The last snapshot is [`Stage::VerticalCentering`] and equals
    /// [`generate`](Self::generate) for the same input.
    pub fn generate_traced(&self, params: &ParameterSet) -> Vec<(Stage, Profile)> {
        let mut trace = Vec::with_capacity(Stage::ALL.len());
        self.run(params, |stage, points| {
            trace.push((stage, Profile::from_points(*points)))
        });
        trace
    }

    /// Applies `preset` to `params`, then generates.
    pub fn generate_preset(&self, preset: Preset, params: &ParameterSet) -> Profile {
        self.generate(&preset.apply(params))
    }

    /// Generates one profile per parameter set, in order.
    #[cfg(not(feature = "parallel"))]
    pub fn generate_many(&self, sets: &[ParameterSet]) -> Vec<Profile> {
        sets.iter().map(|params| self.generate(params)).collect()
    }

    /// Generates one profile per parameter set, in order, across the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn generate_many(&self, sets: &[ParameterSet]) -> Vec<Profile> {
        sets.par_iter().map(|params| self.generate(params)).collect()
    }

    /// The head width factor the pipeline will use for `params`.
    pub fn head_width_factor(&self, params: &ParameterSet) -> HeadWidthFactor {
        let mut points = self.config.template.points();
        let scale = normalize_height(&mut points, params.circumference);
        self.guard_head_width(&points, scale)
    }

    fn run<F>(&self, params: &ParameterSet, mut observe: F) -> Profile
    where
        F: FnMut(Stage, &Points),
    {
        let mut pts = self.config.template.points();

        let scale = normalize_height(&mut pts, params.circumference);
        observe(Stage::HeightNormalization, &pts);

        let head_width = self.guard_head_width(&pts, scale);
        scale_head_width(&mut pts, head_width.factor);
        observe(Stage::HeadWidthScale, &pts);

        let head_center = midpoint(pts[HEAD_BASE_NEAR], pts[HEAD_BASE_FAR]);
        scale_about(
            &mut pts,
            Zone::HeadInterior.range(),
            head_center,
            params.head_expansion / 100.0,
        );
        observe(Stage::HeadRadialScale, &pts);

        let shaft_center = midpoint(pts[SHAFT_BASE], pts[NECK_FAR]);
        scale_about(
            &mut pts,
            Zone::shaft_indices(),
            shaft_center,
            params.shaft_expansion / 100.0,
        );
        observe(Stage::ShaftRadialScale, &pts);

        stretch_length(&mut pts, params.length);
        observe(Stage::LengthStretch, &pts);

        reinterpolate_shaft_controls(&mut pts);
        observe(Stage::ControlPointReinterpolation, &pts);

        bend_shaft(&mut pts, params.shaft_curve);
        observe(Stage::CurveBend, &pts);

        let damped_secant = (secant(params.shaft_curve) - 1.0) * 0.5 + 1.0;
        scale_axis_ends(&mut pts, damped_secant);
        observe(Stage::CurveBendCompensation, &pts);

        let head_pivot = midpoint(pts[NECK_NEAR], pts[NECK_FAR]);
        rotate_indices(&mut pts, Zone::Head.range(), head_pivot, -params.shaft_curve);
        observe(Stage::HeadReleveling, &pts);

        let base = pts[SHAFT_BASE];
        rotate_indices(&mut pts, Zone::Interior.range(), base, -params.shaft_angle);
        observe(Stage::BaseBend, &pts);

        scale_axis_ends(&mut pts, secant(params.shaft_angle));
        observe(Stage::BaseBendCompensation, &pts);

        let tip_pivot = midpoint(pts[HEAD_MID_NEAR], pts[HEAD_MID_FAR]);
        rotate_indices(&mut pts, Zone::Tip.range(), tip_pivot, -params.head_angle);
        observe(Stage::TipTilt, &pts);

        let half_height = (pts[SHAFT_END].y - pts[SHAFT_BASE].y) * 0.5;
        for p in pts.iter_mut() {
            p.y -= half_height;
        }
        observe(Stage::VerticalCentering, &pts);

        trace!(
            length = pts[RIM].x - pts[SHAFT_BASE].x,
            height = pts[SHAFT_END].y - pts[SHAFT_BASE].y,
            "profile generated"
        );
        Profile::from_points(pts)
    }

    /// Picks the head width factor, falling back when widening by the height
    /// scale would drag the neck to within `neck_margin` of the base.
    fn guard_head_width(&self, pts: &Points, scale: Real) -> HeadWidthFactor {
        let base_x = pts[SHAFT_BASE].x;
        let rim_x = pts[RIM].x;
        let neck_x = pts[NECK_NEAR].x;
        let span = rim_x - base_x;

        let projected_neck = rim_x + (neck_x - rim_x) * scale;
        if projected_neck < base_x + span * self.config.neck_margin {
            let factor = (base_x + span * self.config.neck_fallback_fraction) / (rim_x - neck_x);
            debug!(
                scale,
                projected_neck, factor, "head width overlap guard engaged"
            );
            HeadWidthFactor {
                factor,
                overridden: true,
            }
        } else {
            HeadWidthFactor {
                factor: scale,
                overridden: false,
            }
        }
    }
}

#[inline]
fn midpoint(a: Point2<Real>, b: Point2<Real>) -> Point2<Real> {
    a + (b - a) * 0.5
}

#[inline]
fn secant(angle_deg: Real) -> Real {
    1.0 / (angle_deg / 180.0 * PI).cos()
}

/// Scales every Y so the axis ends sit one diameter apart; returns the scale.
fn normalize_height(pts: &mut Points, circumference: Real) -> Real {
    let diameter = circumference / PI;
    let scale = diameter / (pts[SHAFT_END].y - pts[SHAFT_BASE].y);
    for p in pts.iter_mut() {
        p.y *= scale;
    }
    scale
}

fn scale_head_width(pts: &mut Points, factor: Real) {
    let rim_x = pts[RIM].x;
    for i in Zone::Head.range() {
        pts[i].x = rim_x + (pts[i].x - rim_x) * factor;
    }
}

fn scale_about(
    pts: &mut Points,
    indices: impl IntoIterator<Item = usize>,
    center: Point2<Real>,
    factor: Real,
) {
    for i in indices {
        pts[i] = center + (pts[i] - center) * factor;
    }
}

/// Moves the whole head outward so the rim lands `length` from the base.
fn stretch_length(pts: &mut Points, length: Real) {
    let base_x = pts[SHAFT_BASE].x;
    let rim_x = pts[RIM].x;
    let horizontal = length / (rim_x - base_x);
    let stretched_rim_x = base_x + (rim_x - base_x) * horizontal;
    let delta = stretched_rim_x - rim_x;
    for i in Zone::Head.range() {
        pts[i].x += delta;
    }
}

/// Spaces the shaft handles' X at even thirds between axis end and neck.
fn reinterpolate_shaft_controls(pts: &mut Points) {
    let (base_x, neck_near_x) = (pts[SHAFT_BASE].x, pts[NECK_NEAR].x);
    let (end_x, neck_far_x) = (pts[SHAFT_END].x, pts[NECK_FAR].x);
    for k in 1..=2 {
        let third = k as Real / 3.0;
        pts[SHAFT_BASE + k].x = base_x + (neck_near_x - base_x) * third;
        pts[SHAFT_END - k].x = end_x + (neck_far_x - end_x) * third;
    }
}

/// Offsets the shaft handles vertically so the near handles' midpoint swings
/// by `-curve_deg` about the base axis end at constant radius.
fn bend_shaft(pts: &mut Points, curve_deg: Real) {
    let base = pts[SHAFT_BASE];
    let handle = midpoint(pts[SHAFT_BASE + 1], pts[SHAFT_BASE + 2]) - base;
    let radius = handle.norm();
    let angle = handle.y.atan2(handle.x).to_degrees() - curve_deg;
    let offset = handle.y - angle.to_radians().sin() * radius;
    for i in Zone::shaft_indices() {
        pts[i].y += offset;
    }
}

fn scale_axis_ends(pts: &mut Points, factor: Real) {
    pts[SHAFT_BASE].y *= factor;
    pts[SHAFT_END].y *= factor;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_covers_every_stage_in_order() {
        let generator = ProfileGenerator::default();
        let trace = generator.generate_traced(&ParameterSet::default());
        let stages: Vec<Stage> = trace.iter().map(|(stage, _)| *stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
        let last = trace.last().map(|(_, p)| *p);
        assert_eq!(last, Some(generator.generate(&ParameterSet::default())));
    }

    #[test]
    fn height_normalization_matches_diameter() {
        let mut pts = ShapeConfig::standard().template.points();
        let scale = normalize_height(&mut pts, 35.0 * PI);
        assert!((scale - 1.0).abs() < 1e-12);
        assert!((pts[SHAFT_END].y - 35.0).abs() < 1e-12);
    }

    #[test]
    fn default_parameters_do_not_trip_the_guard() {
        let generator = ProfileGenerator::default();
        let head = generator.head_width_factor(&ParameterSet::default());
        assert!(!head.overridden);
        assert!((head.factor - 140.0 / PI / 35.0).abs() < 1e-12);
    }

    #[test]
    fn fallback_factor_uses_x_positions_only() {
        let generator = ProfileGenerator::default();
        let params = ParameterSet {
            circumference: 140.0 * PI,
            ..ParameterSet::default()
        };
        let head = generator.head_width_factor(&params);
        assert!(head.overridden);
        // (0 + 0.1 * 129) / (129 - 84)
        assert!((head.factor - 12.9 / 45.0).abs() < 1e-12);
    }

    #[test]
    fn radial_scales_use_their_own_centers() {
        let generator = ProfileGenerator::default();
        let params = ParameterSet {
            shaft_expansion: 150.0,
            head_expansion: 80.0,
            ..ParameterSet::default()
        };
        let trace = generator.generate_traced(&params);
        let widened = trace[1].1;
        let head_scaled = trace[2].1;
        let shaft_scaled = trace[3].1;
        assert_eq!(trace[2].0, Stage::HeadRadialScale);

        let head_center = midpoint(widened[HEAD_BASE_NEAR], widened[HEAD_BASE_FAR]);
        for i in Zone::HeadInterior.range() {
            let expected = head_center + (widened[i] - head_center) * 0.8;
            assert!((head_scaled[i] - expected).norm() < 1e-12, "head point {i}");
        }
        // the scale centers themselves stay put
        assert_eq!(head_scaled[HEAD_BASE_NEAR], widened[HEAD_BASE_NEAR]);
        assert_eq!(head_scaled[HEAD_BASE_FAR], widened[HEAD_BASE_FAR]);

        let shaft_center = midpoint(head_scaled[SHAFT_BASE], head_scaled[NECK_FAR]);
        for i in Zone::shaft_indices() {
            let expected = shaft_center + (head_scaled[i] - shaft_center) * 1.5;
            assert!((shaft_scaled[i] - expected).norm() < 1e-12, "shaft point {i}");
        }
        assert_eq!(shaft_scaled[SHAFT_BASE], head_scaled[SHAFT_BASE]);
        assert_eq!(shaft_scaled[NECK_FAR], head_scaled[NECK_FAR]);
    }

    #[test]
    fn secant_of_zero_is_exactly_one() {
        assert_eq!(secant(0.0), 1.0);
        assert_eq!((secant(0.0) - 1.0) * 0.5 + 1.0, 1.0);
    }

    #[test]
    fn stretch_puts_rim_at_length() {
        let mut pts = ShapeConfig::standard().template.points();
        stretch_length(&mut pts, 200.0);
        assert!((pts[RIM].x - 200.0).abs() < 1e-12);
        // shaft handles untouched
        assert_eq!(pts[1].x, 29.0);
    }
}
