//! The generated half-silhouette and the operations that consume it.

use crate::config::ShapeConfig;
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::revolve::AxisEnds;
use crate::template::{POINT_COUNT, RIM, SHAFT_BASE, SHAFT_END};
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line, LineString, Polygon as GeoPolygon};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub mod generator;

pub use generator::{ProfileGenerator, Stage};

/// Number of cubic Bézier segments a profile is made of.
pub const SEGMENT_COUNT: usize = (POINT_COUNT - 1) / 3;

/// Ordered half-silhouette of an axially symmetric solid.
///
/// Always 25 points with the index semantics of [`crate::template`]; a
/// profile is a plain value with no ties to the call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    points: [Point2<Real>; POINT_COUNT],
}

impl Profile {
    pub const fn from_points(points: [Point2<Real>; POINT_COUNT]) -> Self {
        Self { points }
    }

    /// The unscaled template of `config` as a profile.
    pub fn template(config: &ShapeConfig) -> Self {
        Self::from_points(config.template.points())
    }

    #[inline]
    pub const fn points(&self) -> &[Point2<Real>; POINT_COUNT] {
        &self.points
    }

    #[inline]
    pub const fn point(&self, index: usize) -> Point2<Real> {
        self.points[index]
    }

    pub fn xs(&self) -> [Real; POINT_COUNT] {
        self.points.map(|p| p.x)
    }

    pub fn ys(&self) -> [Real; POINT_COUNT] {
        self.points.map(|p| p.y)
    }

    /// The two indices lying on the axis of revolution.
    pub const fn axis_ends(&self) -> AxisEnds {
        AxisEnds::STANDARD
    }

    #[inline]
    pub const fn rim(&self) -> Point2<Real> {
        self.points[RIM]
    }

    /// Signed vertical distance from the base axis end to the far axis end.
    pub fn height(&self) -> Real {
        self.points[SHAFT_END].y - self.points[SHAFT_BASE].y
    }

    /// Horizontal distance from the base axis end to the rim.
    pub fn length(&self) -> Real {
        self.points[RIM].x - self.points[SHAFT_BASE].x
    }

    /// Pointwise linear blend towards `other`.
    ///
    /// `t = 0` returns `self` and `t = 1` returns `other` exactly; other values,
    /// including ones outside `[0, 1]`, interpolate or extrapolate linearly.
    pub fn lerp(&self, other: &Profile, t: Real) -> Profile {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }
        Profile::from_points(std::array::from_fn(|i| self.points[i].lerp(&other.points[i], t)))
    }

    /// **Mathematical Foundation: Cubic Bézier Flattening**
    ///
    /// Every third point is an anchor; each run `P₃ₖ … P₃ₖ₊₃` is a cubic
    /// ```text
    /// B(t) = (1−t)³P₀ + 3t(1−t)²P₁ + 3t²(1−t)P₂ + t³P₃,  t ∈ [0, 1]
    /// ```
    /// sampled at `steps_per_segment` uniform steps. Shared anchors are emitted
    /// once, so the result holds `8·steps + 1` points and starts and ends on
    /// the axis ends. A step count of zero is treated as one (the anchors only).
    pub fn flatten(&self, steps_per_segment: usize) -> Vec<Point2<Real>> {
        let steps = steps_per_segment.max(1);
        let mut out = Vec::with_capacity(SEGMENT_COUNT * steps + 1);
        out.push(self.points[0]);

        for segment in self.points.windows(4).step_by(3) {
            let [p0, p1, p2, p3] = [segment[0], segment[1], segment[2], segment[3]];
            for s in 1..=steps {
                let t = s as Real / steps as Real;
                let mt = 1.0 - t;
                let coords = p0.coords * (mt * mt * mt)
                    + p1.coords * (3.0 * t * mt * mt)
                    + p2.coords * (3.0 * t * t * mt)
                    + p3.coords * (t * t * t);
                out.push(Point2::from(coords));
            }
            // land exactly on the anchor
            if let Some(last) = out.last_mut() {
                *last = p3;
            }
        }
        out
    }

    /// The control polyline as an open `geo::LineString`.
    pub fn to_line_string(&self) -> LineString<Real> {
        self.points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect()
    }

    /// The control polyline closed along the axis (far end back to base).
    pub fn to_polygon(&self) -> GeoPolygon<Real> {
        GeoPolygon::new(self.to_line_string(), vec![])
    }

    /// Caller-side sanity check of a generated profile.
    ///
    /// Reports the first non-finite coordinate or the first proper crossing between two
    /// non-adjacent control segments, the axis segment included.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some((index, point)) = self
            .points
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(ValidationError::InvalidCoordinate { index, point: *point });
        }

        let segments: Vec<(usize, usize)> = (0..POINT_COUNT)
            .map(|i| (i, (i + 1) % POINT_COUNT))
            .collect();

        for (a, &(i, j)) in segments.iter().enumerate() {
            for &(k, l) in &segments[a + 1..] {
                if i == k || i == l || j == k || j == l {
                    continue;
                }
                let first = self.segment(i, j);
                let second = self.segment(k, l);
                if let Some(LineIntersection::SinglePoint {
                    intersection,
                    is_proper: true,
                }) = line_intersection(first, second)
                {
                    return Err(ValidationError::SelfIntersection {
                        first: (i, j),
                        second: (k, l),
                        point: Point2::new(intersection.x, intersection.y),
                    });
                }
            }
        }
        Ok(())
    }

    fn segment(&self, from: usize, to: usize) -> Line<Real> {
        let (a, b) = (self.points[from], self.points[to]);
        Line::new(Coord { x: a.x, y: a.y }, Coord { x: b.x, y: b.y })
    }
}

impl Index<usize> for Profile {
    type Output = Point2<Real>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl From<Profile> for LineString<Real> {
    fn from(profile: Profile) -> Self {
        profile.to_line_string()
    }
}
