//! Boundary between generated profiles and the external mesh builders.
//!
//! Sweeping a profile into a mesh and cross-fading meshes happen outside this
//! crate. This module only fixes what those collaborators receive: the
//! profile, which two indices lie on the axis, and how finely to revolve.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::profile::Profile;
use crate::template::{SHAFT_BASE, SHAFT_END};
use serde::{Deserialize, Serialize};

/// Smallest revolution segment count a request accepts.
pub const MIN_SEGMENTS: usize = 2;

/// The pair of profile indices lying on the axis of revolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisEnds {
    pub start: usize,
    pub end: usize,
}

impl AxisEnds {
    pub const STANDARD: AxisEnds = AxisEnds {
        start: SHAFT_BASE,
        end: SHAFT_END,
    };
}

/// Everything a revolve builder needs to sweep one profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevolveRequest {
    pub profile: Profile,
    pub axis: AxisEnds,
    pub segments: usize,
}

impl RevolveRequest {
    pub fn new(profile: Profile, segments: usize) -> Result<Self, ValidationError> {
        if segments < MIN_SEGMENTS {
            return Err(ValidationError::TooFewSegments {
                got: segments,
                min: MIN_SEGMENTS,
            });
        }
        Ok(Self {
            axis: profile.axis_ends(),
            profile,
            segments,
        })
    }
}

/// Sweeps a profile around its axis into a mesh of the builder's choosing.
pub trait RevolveBuilder {
    type Mesh;

    fn revolve(&self, request: &RevolveRequest) -> Self::Mesh;
}

/// Blends two profiles that share indexing.
pub trait MorphInterpolator {
    /// `t` runs from 0 (all `from`) to 1 (all `to`).
    fn morph(&self, from: &Profile, to: &Profile, t: Real) -> Profile;
}

/// Pointwise linear blend, the minimum morph contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearMorph;

impl MorphInterpolator for LinearMorph {
    fn morph(&self, from: &Profile, to: &Profile, t: Real) -> Profile {
        from.lerp(to, t)
    }
}

impl Profile {
    /// Packages this profile into a [`RevolveRequest`] and hands it to `builder`.
    pub fn revolve_with<B: RevolveBuilder>(
        &self,
        builder: &B,
        segments: usize,
    ) -> Result<B::Mesh, ValidationError> {
        let request = RevolveRequest::new(*self, segments)?;
        Ok(builder.revolve(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeConfig;

    struct CountingBuilder;

    impl RevolveBuilder for CountingBuilder {
        type Mesh = (usize, usize, usize);

        fn revolve(&self, request: &RevolveRequest) -> Self::Mesh {
            (request.axis.start, request.axis.end, request.segments)
        }
    }

    #[test]
    fn request_carries_axis_ends() {
        let profile = Profile::template(ShapeConfig::standard());
        assert_eq!(profile.revolve_with(&CountingBuilder, 12), Ok((0, 24, 12)));
    }

    #[test]
    fn too_few_segments() {
        let profile = Profile::template(ShapeConfig::standard());
        assert_eq!(
            RevolveRequest::new(profile, 1),
            Err(ValidationError::TooFewSegments { got: 1, min: 2 })
        );
    }
}
