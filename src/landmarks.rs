//! Face-mesh landmark frames and the named anchor points read from them.

use serde::Deserialize;

use crate::error::FrameError;

/// Landmark count of the base face mesh.
pub const FACE_MESH_POINTS: usize = 468;
/// Landmark count when iris refinement is enabled.
pub const REFINED_FACE_MESH_POINTS: usize = 478;

/// A normalized landmark. `x`/`y` are image fractions, `z` is relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f64; 3]")]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane (depth ignored).
    pub fn planar_distance(&self, other: &Point3) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Anatomical anchor points, named from the subject's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    FaceMidRight,
    FaceMidLeft,
    FaceMidTop,
    FaceMidBottom,
    CheekMidRight,
    CheekMidLeft,

    EyeRightTop,
    EyeRightBottom,
    EyeRightInner,
    EyeRightOuter,
    EyeLeftTop,
    EyeLeftBottom,
    EyeLeftInner,
    EyeLeftOuter,

    MouthOuterTop,
    MouthOuterRight,
    MouthOuterLeft,
    MouthInnerTop,
    MouthInnerBottom,
    MouthInnerRight,
    MouthInnerLeft,
    MouthOuterRightMidTop,
    MouthOuterRightMidBottom,
    MouthOuterLeftMidTop,
    MouthOuterLeftMidBottom,

    NoseBottom,

    BrowRightTop,
    BrowRightBottom,
    BrowLeftTop,
    BrowLeftBottom,
}

impl Anchor {
    /// Index of this anchor in a face-mesh frame.
    pub const fn index(self) -> usize {
        match self {
            Anchor::FaceMidRight => 234,
            Anchor::FaceMidLeft => 454,
            Anchor::FaceMidTop => 10,
            Anchor::FaceMidBottom => 152,
            Anchor::CheekMidRight => 50,
            Anchor::CheekMidLeft => 280,

            Anchor::EyeRightTop => 159,
            Anchor::EyeRightBottom => 145,
            Anchor::EyeRightInner => 133,
            Anchor::EyeRightOuter => 33,
            Anchor::EyeLeftTop => 386,
            Anchor::EyeLeftBottom => 374,
            Anchor::EyeLeftInner => 362,
            Anchor::EyeLeftOuter => 263,

            Anchor::MouthOuterTop => 0,
            Anchor::MouthOuterRight => 61,
            Anchor::MouthOuterLeft => 291,
            Anchor::MouthInnerTop => 13,
            Anchor::MouthInnerBottom => 14,
            Anchor::MouthInnerRight => 78,
            Anchor::MouthInnerLeft => 308,
            Anchor::MouthOuterRightMidTop => 39,
            Anchor::MouthOuterRightMidBottom => 181,
            Anchor::MouthOuterLeftMidTop => 269,
            Anchor::MouthOuterLeftMidBottom => 405,

            Anchor::NoseBottom => 2,

            Anchor::BrowRightTop => 52,
            Anchor::BrowRightBottom => 223,
            Anchor::BrowLeftTop => 443,
            Anchor::BrowLeftBottom => 257,
        }
    }
}

/// One detected face. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: Vec<Point3>,
}

impl LandmarkFrame {
    /// Wrap a landmark list, rejecting anything that is not a face-mesh frame.
    pub fn new(points: Vec<Point3>) -> Result<Self, FrameError> {
        match points.len() {
            FACE_MESH_POINTS | REFINED_FACE_MESH_POINTS => Ok(Self { points }),
            n => Err(FrameError::LandmarkCount(n)),
        }
    }

    pub fn point(&self, anchor: Anchor) -> Point3 {
        // Every anchor index is below FACE_MESH_POINTS, which `new` guarantees.
        self.points[anchor.index()]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }
}
