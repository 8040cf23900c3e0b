#![allow(dead_code)]

use facekeys::GestureConfig;
use facekeys::keys::ChordLog;
use facekeys::landmarks::{Anchor, FACE_MESH_POINTS, LandmarkFrame, Point3};
use facekeys::orchestrator::{FrameOutcome, GestureOrchestrator};

pub const EYE_OPEN: f64 = 0.3;
pub const EYE_SHUT: f64 = 0.1;
pub const EYE_SQUINT: f64 = 0.16;

const EYE_WIDTH: f64 = 0.08;
const EYE_TOP_Y: f64 = 0.388;
const MOUTH_Y: f64 = 0.65;
const MOUTH_WIDTH: f64 = 0.1;

/// Synthetic face-mesh frame with just the anchors the classifier reads.
///
/// Neutral geometry: both eyes at aspect ratio 0.3, mouth closed (0.05),
/// no frown, nose-to-mouth 0.1, mouth width over lip height 2.0, brows
/// 0.05 (right) and 0.04 (left) above the eyelids.
#[derive(Debug, Clone)]
pub struct FaceBuilder {
    eye_right: f64,
    eye_left: f64,
    mouth_open: bool,
    scrunched: bool,
    pursed: bool,
    brow_right: f64,
    brow_left: f64,
    head_turned: bool,
}

impl FaceBuilder {
    pub fn neutral() -> Self {
        Self {
            eye_right: EYE_OPEN,
            eye_left: EYE_OPEN,
            mouth_open: false,
            scrunched: false,
            pursed: false,
            brow_right: 0.05,
            brow_left: 0.04,
            head_turned: false,
        }
    }

    pub fn eyes(mut self, right: f64, left: f64) -> Self {
        self.eye_right = right;
        self.eye_left = left;
        self
    }

    pub fn wink_right(self) -> Self {
        self.eyes(EYE_SHUT, EYE_OPEN)
    }

    pub fn wink_left(self) -> Self {
        self.eyes(EYE_OPEN, EYE_SHUT)
    }

    pub fn blink(self) -> Self {
        self.eyes(EYE_SHUT, EYE_SHUT)
    }

    pub fn open_mouth(mut self) -> Self {
        self.mouth_open = true;
        self
    }

    /// Nose pulled down toward a frowning mouth.
    pub fn scrunch(mut self) -> Self {
        self.scrunched = true;
        self
    }

    /// Narrow lips, read as duckface.
    pub fn pursed(mut self) -> Self {
        self.pursed = true;
        self
    }

    pub fn brows(mut self, right: f64, left: f64) -> Self {
        self.brow_right = right;
        self.brow_left = left;
        self
    }

    pub fn raised_brows(self) -> Self {
        self.brows(0.08, 0.07)
    }

    pub fn turned_head(mut self) -> Self {
        self.head_turned = true;
        self
    }

    pub fn points(&self) -> Vec<Point3> {
        let mut points = vec![Point3::new(0.5, 0.5, 0.0); FACE_MESH_POINTS];
        let mut set = |anchor: Anchor, x: f64, y: f64| points[anchor.index()] = Point3::new(x, y, 0.0);

        set(Anchor::FaceMidRight, 0.3, 0.5);
        set(Anchor::FaceMidLeft, 0.7, 0.5);
        set(Anchor::FaceMidTop, 0.5, 0.2);
        set(Anchor::FaceMidBottom, 0.5, 0.8);
        let cheek_right = if self.head_turned { 0.25 } else { 0.38 };
        set(Anchor::CheekMidRight, cheek_right, 0.55);
        set(Anchor::CheekMidLeft, 0.62, 0.55);

        set(Anchor::EyeRightOuter, 0.36, 0.4);
        set(Anchor::EyeRightInner, 0.36 + EYE_WIDTH, 0.4);
        set(Anchor::EyeRightTop, 0.4, EYE_TOP_Y);
        set(Anchor::EyeRightBottom, 0.4, EYE_TOP_Y + self.eye_right * EYE_WIDTH);
        set(Anchor::EyeLeftInner, 0.56, 0.4);
        set(Anchor::EyeLeftOuter, 0.56 + EYE_WIDTH, 0.4);
        set(Anchor::EyeLeftTop, 0.6, EYE_TOP_Y);
        set(Anchor::EyeLeftBottom, 0.6, EYE_TOP_Y + self.eye_left * EYE_WIDTH);

        set(Anchor::BrowRightTop, 0.4, EYE_TOP_Y - self.brow_right);
        set(Anchor::BrowRightBottom, 0.4, EYE_TOP_Y - self.brow_right);
        set(Anchor::BrowLeftTop, 0.6, EYE_TOP_Y - self.brow_left);
        set(Anchor::BrowLeftBottom, 0.6, EYE_TOP_Y - self.brow_left);

        let opening = if self.mouth_open { 0.04 } else { 0.005 };
        let corner_y = if self.scrunched { 0.67 } else { MOUTH_Y };
        set(Anchor::MouthInnerRight, 0.5 - MOUTH_WIDTH / 2.0, corner_y);
        set(Anchor::MouthInnerLeft, 0.5 + MOUTH_WIDTH / 2.0, corner_y);
        set(Anchor::MouthInnerTop, 0.5, MOUTH_Y - opening / 2.0);
        set(Anchor::MouthInnerBottom, 0.5, MOUTH_Y + opening / 2.0);

        let outer = if self.pursed { 0.04 } else { 0.08 };
        set(Anchor::MouthOuterRight, 0.5 - outer, MOUTH_Y);
        set(Anchor::MouthOuterLeft, 0.5 + outer, MOUTH_Y);
        set(Anchor::MouthOuterTop, 0.5, 0.62);
        set(Anchor::MouthOuterRightMidTop, 0.47, 0.62);
        set(Anchor::MouthOuterRightMidBottom, 0.47, 0.68);
        set(Anchor::MouthOuterLeftMidTop, 0.53, 0.62);
        set(Anchor::MouthOuterLeftMidBottom, 0.53, 0.68);

        let nose_y = if self.scrunched { 0.58 } else { 0.56 };
        set(Anchor::NoseBottom, 0.5, nose_y);

        points
    }

    pub fn build(&self) -> LandmarkFrame {
        LandmarkFrame::new(self.points()).expect("synthetic face has a full mesh")
    }

    /// One NDJSON detector line holding this face.
    pub fn json_line(&self) -> String {
        let face: Vec<[f64; 3]> = self.points().iter().map(|p| [p.x, p.y, p.z]).collect();
        serde_json::to_string(&vec![face]).expect("landmarks serialize")
    }
}

pub fn orchestrator() -> (GestureOrchestrator<ChordLog>, ChordLog) {
    let log = ChordLog::new();
    (
        GestureOrchestrator::new(GestureConfig::default(), log.clone()),
        log,
    )
}

pub fn feed(orch: &mut GestureOrchestrator<ChordLog>, faces: &[FaceBuilder]) -> Vec<FrameOutcome> {
    faces.iter().map(|face| orch.process(Some(&face.build()))).collect()
}

pub fn neutral() -> FaceBuilder {
    FaceBuilder::neutral()
}
