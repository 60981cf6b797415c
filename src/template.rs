//! The reference silhouette and the named index ranges that segment it.
//!
//! The 25 points are cubic Bézier control points: the nine boundary indices
//! (every third point) are the anchors, the two points between each pair of
//! anchors are the handles. Traversal starts on the axis at the shaft base,
//! runs along the near side of the shaft, over the head and around the rim,
//! then back along the far side to the other axis end.

use crate::float_types::Real;
use nalgebra::Point2;
use std::ops::RangeInclusive;

/// Number of points in every template and generated profile.
pub const POINT_COUNT: usize = 25;

/// Axis end at the base of the shaft; pivot of the base bend.
pub const SHAFT_BASE: usize = 0;
/// Neck transition into the head on the near side.
pub const NECK_NEAR: usize = 3;
/// Base of the head on the near side.
pub const HEAD_BASE_NEAR: usize = 6;
/// Middle of the head on the near side.
pub const HEAD_MID_NEAR: usize = 9;
/// Outermost point of the head: length reference and head width pivot.
pub const RIM: usize = 12;
/// Middle of the head on the far side.
pub const HEAD_MID_FAR: usize = 15;
/// Base of the head on the far side.
pub const HEAD_BASE_FAR: usize = 18;
/// Neck transition into the head on the far side.
pub const NECK_FAR: usize = 21;
/// Axis end closing the silhouette.
pub const SHAFT_END: usize = 24;

/// All boundary indices in profile order.
pub const BOUNDARIES: [usize; 9] = [
    SHAFT_BASE,
    NECK_NEAR,
    HEAD_BASE_NEAR,
    HEAD_MID_NEAR,
    RIM,
    HEAD_MID_FAR,
    HEAD_BASE_FAR,
    NECK_FAR,
    SHAFT_END,
];

const TEMPLATE_X: [Real; POINT_COUNT] = [
    0.0, 29.0, 55.0, 84.0, 86.0, 89.0, 91.0, 92.0, 93.0, 96.0, 105.0, 124.0, 129.0, 128.0, 123.0,
    116.0, 113.0, 113.0, 111.0, 109.0, 106.0, 103.0, 66.0, 34.0, 0.0,
];
const TEMPLATE_Y: [Real; POINT_COUNT] = [
    0.0, 2.0, 3.0, 1.0, 2.0, 2.0, 4.0, 2.0, 0.0, -3.0, 0.0, 1.0, 13.0, 21.0, 29.0, 32.0, 31.0,
    31.0, 30.0, 31.0, 32.0, 33.0, 36.0, 35.0, 35.0,
];

/// An immutable ordered set of unscaled reference points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    xs: [Real; POINT_COUNT],
    ys: [Real; POINT_COUNT],
}

impl Template {
    /// The built-in silhouette.
    pub const STANDARD: Template = Template {
        xs: TEMPLATE_X,
        ys: TEMPLATE_Y,
    };

    /// A fresh working copy of the template points.
    pub fn points(&self) -> [Point2<Real>; POINT_COUNT] {
        std::array::from_fn(|i| Point2::new(self.xs[i], self.ys[i]))
    }

    #[inline]
    pub fn point(&self, index: usize) -> Point2<Real> {
        Point2::new(self.xs[index], self.ys[index])
    }

    /// Vertical distance between the two axis ends.
    pub fn height(&self) -> Real {
        self.ys[SHAFT_END] - self.ys[SHAFT_BASE]
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Inclusive interval of profile indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    #[inline]
    pub const fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl IntoIterator for IndexRange {
    type Item = usize;
    type IntoIter = RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Named index ranges the transform stages operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Neck to neck, `[3, 21]`: the head including both neck transitions.
    Head,
    /// One past each head-middle boundary, `[8, 16]`: the bulb scaled radially.
    HeadInterior,
    /// Everything strictly between the two axis ends, `[1, 23]`.
    Interior,
    /// Shaft control handles next to the base axis end, `[1, 2]`.
    NearShaft,
    /// Shaft control handles next to the far axis end, `[22, 23]`.
    FarShaft,
    /// The rim and its two neighbours, `[11, 13]`.
    Tip,
}

impl Zone {
    /// The shaft proper: `Interior` minus `Head`.
    pub const SHAFT_CONTROLS: [Zone; 2] = [Zone::NearShaft, Zone::FarShaft];

    pub const fn range(self) -> IndexRange {
        match self {
            Zone::Head => IndexRange::new(NECK_NEAR, NECK_FAR),
            Zone::HeadInterior => IndexRange::new(HEAD_MID_NEAR - 1, HEAD_MID_FAR + 1),
            Zone::Interior => IndexRange::new(SHAFT_BASE + 1, SHAFT_END - 1),
            Zone::NearShaft => IndexRange::new(SHAFT_BASE + 1, NECK_NEAR - 1),
            Zone::FarShaft => IndexRange::new(NECK_FAR + 1, SHAFT_END - 1),
            Zone::Tip => IndexRange::new(RIM - 1, RIM + 1),
        }
    }

    /// Indices of the shaft controls, near side first.
    pub fn shaft_indices() -> impl Iterator<Item = usize> {
        Zone::SHAFT_CONTROLS.into_iter().flat_map(|zone| zone.range())
    }
}
