//! Text callouts anchored on named profile points.
//!
//! Only the anchor positions and strings are produced here; placing and
//! drawing them is left to the caller. Anchors rely on stable indexing: the
//! same index names the same spot of the silhouette for every parameter set.

use crate::float_types::Real;
use crate::parameters::{ParameterKind, ParameterSet};
use crate::profile::Profile;
use crate::template::{HEAD_MID_NEAR, NECK_NEAR, RIM, SHAFT_BASE, SHAFT_END};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// How many callouts to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Detail {
    /// Length at the rim and diameter across the shaft.
    #[default]
    Summary,
    /// One callout per geometry parameter.
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub parameter: ParameterKind,
    pub anchor: Point2<Real>,
    pub text: String,
}

impl Annotation {
    fn new(parameter: ParameterKind, anchor: Point2<Real>, text: String) -> Self {
        Self {
            parameter,
            anchor,
            text,
        }
    }
}

/// Builds the callouts for a generated `profile` and the `params` it came from.
pub fn annotate(profile: &Profile, params: &ParameterSet, detail: Detail) -> Vec<Annotation> {
    let length = format!("{}mm", params.length);
    let diameter = format!("φ{}mm", params.diameter().floor());

    match detail {
        Detail::Summary => {
            let near = profile[SHAFT_BASE + 1];
            let far = profile[SHAFT_END - 1];
            vec![
                Annotation::new(ParameterKind::Length, profile[RIM], length),
                Annotation::new(
                    ParameterKind::Circumference,
                    near + (far - near) * 0.5,
                    diameter,
                ),
            ]
        }
        Detail::Full => vec![
            Annotation::new(ParameterKind::Length, profile[RIM - 1], length),
            Annotation::new(ParameterKind::Circumference, profile[SHAFT_END], diameter),
            Annotation::new(
                ParameterKind::ShaftCurve,
                Point2::new(profile[SHAFT_BASE + 1].x, profile[NECK_NEAR].y),
                format!("{}°", params.shaft_curve),
            ),
            Annotation::new(
                ParameterKind::ShaftAngle,
                profile[SHAFT_BASE],
                format!("{}°", params.shaft_angle),
            ),
            Annotation::new(
                ParameterKind::HeadAngle,
                profile[RIM + 1],
                format!("{}°", params.head_angle),
            ),
            Annotation::new(
                ParameterKind::ShaftExpansion,
                profile[HEAD_MID_NEAR],
                format!("{}%", params.shaft_expansion),
            ),
            Annotation::new(
                ParameterKind::HeadExpansion,
                profile[SHAFT_END - 1],
                format!("{}%", params.head_expansion),
            ),
        ],
    }
}
