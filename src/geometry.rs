//! Scalar ratios and angles derived from a single landmark frame.
//!
//! Extraction is pure. A ratio whose denominator collapses to zero is left
//! undefined (`None`) so the channel that depends on it skips the frame,
//! while the rest of the readout stays usable.

use tracing::debug;

use crate::error::{FrameError, Side};
use crate::landmarks::{Anchor, LandmarkFrame, Point3};

/// Denominators smaller than this are treated as zero.
const EPSILON: f64 = 1e-9;

/// Per-frame geometry. No state survives between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryReadout {
    /// Horizontal offset of forehead over chin, relative to face width.
    pub face_tilt: Option<f64>,
    pub eye_right: Option<f64>,
    pub eye_left: Option<f64>,
    /// Inner lip opening height over width.
    pub mouth_inner: Option<f64>,
    /// How far each inner mouth corner sits below the inner bottom lip.
    pub frown_right: f64,
    pub frown_left: f64,
    /// Nose-to-upper-lip gap relative to face height.
    pub nose_to_mouth: Option<f64>,
    pub snarl_right: Option<f64>,
    /// Outer mouth width over lip height, both face-normalized. Low values mean pursed lips.
    pub duckface: Option<f64>,
    /// Mean brow-to-eye distance of both sides relative to face height.
    pub brow_average_raise: Option<f64>,
    /// Raw right-minus-left brow-to-eye distance.
    pub brow_difference: f64,
}

impl GeometryReadout {
    pub fn eye_average(&self) -> Option<f64> {
        Some((self.eye_right? + self.eye_left?) / 2.0)
    }
}

/// Opening height over opening width for an eye or the inner mouth.
pub fn aspect_ratio(
    what: &'static str,
    top: Point3,
    bottom: Point3,
    right: Point3,
    left: Point3,
) -> Result<f64, FrameError> {
    ratio(
        what,
        top.planar_distance(&bottom),
        right.planar_distance(&left),
    )
}

fn ratio(what: &'static str, numerator: f64, denominator: f64) -> Result<f64, FrameError> {
    if denominator.abs() < EPSILON {
        Err(FrameError::DegenerateGeometry(what))
    } else {
        Ok(numerator / denominator)
    }
}

fn defined(value: Result<f64, FrameError>) -> Option<f64> {
    value
        .map_err(|e| debug!(error = %e, "ratio undefined for this frame"))
        .ok()
}

/// Derives a [`GeometryReadout`] from a [`LandmarkFrame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryExtractor;

impl GeometryExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns `HeadTurned` when a cheek crosses past the face edge, in which
    /// case no gesture should be classified for this frame.
    pub fn head_turn(&self, frame: &LandmarkFrame) -> Result<(), FrameError> {
        let face_right = frame.point(Anchor::FaceMidRight);
        let face_left = frame.point(Anchor::FaceMidLeft);
        if frame.point(Anchor::CheekMidRight).x < face_right.x {
            return Err(FrameError::HeadTurned(Side::Right));
        }
        if frame.point(Anchor::CheekMidLeft).x > face_left.x {
            return Err(FrameError::HeadTurned(Side::Left));
        }
        Ok(())
    }

    pub fn extract(&self, frame: &LandmarkFrame) -> Result<GeometryReadout, FrameError> {
        self.head_turn(frame)?;

        let p = |anchor| frame.point(anchor);
        let face_right = p(Anchor::FaceMidRight);
        let face_left = p(Anchor::FaceMidLeft);
        let face_top = p(Anchor::FaceMidTop);
        let face_bottom = p(Anchor::FaceMidBottom);
        let face_width = face_right.x - face_left.x;
        let face_height = face_bottom.y - face_top.y;

        let face_tilt = defined(ratio("face width", face_top.x - face_bottom.x, face_width));

        let eye_right = defined(aspect_ratio(
            "right eye width",
            p(Anchor::EyeRightTop),
            p(Anchor::EyeRightBottom),
            p(Anchor::EyeRightOuter),
            p(Anchor::EyeRightInner),
        ));
        let eye_left = defined(aspect_ratio(
            "left eye width",
            p(Anchor::EyeLeftTop),
            p(Anchor::EyeLeftBottom),
            p(Anchor::EyeLeftOuter),
            p(Anchor::EyeLeftInner),
        ));

        let inner_bottom = p(Anchor::MouthInnerBottom);
        let inner_right = p(Anchor::MouthInnerRight);
        let inner_left = p(Anchor::MouthInnerLeft);
        let mouth_inner = defined(aspect_ratio(
            "inner mouth width",
            p(Anchor::MouthInnerTop),
            inner_bottom,
            inner_right,
            inner_left,
        ));

        let nose_to_mouth = defined(ratio(
            "face height",
            p(Anchor::MouthOuterTop).y - p(Anchor::NoseBottom).y,
            face_height,
        ));

        let right_mid_top = p(Anchor::MouthOuterRightMidTop);
        let left_mid_top = p(Anchor::MouthOuterLeftMidTop);
        let snarl_right = defined(ratio(
            "face edge height",
            left_mid_top.y - right_mid_top.y,
            face_right.y - face_left.y,
        ));

        let mouth_width = ratio(
            "face width",
            p(Anchor::MouthOuterRight).x - p(Anchor::MouthOuterLeft).x,
            face_width,
        );
        let lip_height = ratio(
            "face height",
            (right_mid_top.y - p(Anchor::MouthOuterRightMidBottom).y)
                + (left_mid_top.y - p(Anchor::MouthOuterLeftMidBottom).y),
            -face_height,
        );
        let duckface = defined(
            mouth_width.and_then(|width| lip_height.and_then(|h| ratio("lip height", width, h))),
        );

        let brow_right = brow_distance(
            p(Anchor::BrowRightTop),
            p(Anchor::BrowRightBottom),
            p(Anchor::EyeRightTop),
        );
        let brow_left = brow_distance(
            p(Anchor::BrowLeftTop),
            p(Anchor::BrowLeftBottom),
            p(Anchor::EyeLeftTop),
        );
        let brow_average_raise = defined(ratio("face height", brow_right + brow_left, face_height));

        Ok(GeometryReadout {
            face_tilt,
            eye_right,
            eye_left,
            mouth_inner,
            frown_right: inner_right.y - inner_bottom.y,
            frown_left: inner_left.y - inner_bottom.y,
            nose_to_mouth,
            snarl_right,
            duckface,
            brow_average_raise,
            brow_difference: brow_right - brow_left,
        })
    }
}

/// Mean distance from both brow edges to the top eyelid.
fn brow_distance(brow_top: Point3, brow_bottom: Point3, eye_top: Point3) -> f64 {
    (brow_bottom.planar_distance(&eye_top) + brow_top.planar_distance(&eye_top)) / 2.0
}
