//! Newline-delimited JSON landmark source.
//!
//! Each line holds the detector's result for one frame: a list of faces,
//! each a list of `[x, y, z]` points. Only the first face is used.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::{FrameError, PipelineError};
use crate::landmarks::{LandmarkFrame, Point3};

/// One decoded detector result.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Face(LandmarkFrame),
    NoFace,
    /// A face was reported but can't be used.
    Invalid(FrameError),
}

impl Detection {
    fn from_faces(faces: Vec<Vec<Point3>>) -> Self {
        let Some(first) = faces.into_iter().next() else {
            return Detection::NoFace;
        };
        match LandmarkFrame::new(first) {
            Ok(frame) => Detection::Face(frame),
            Err(e) => {
                warn!(error = %e, "skipping face");
                Detection::Invalid(e)
            }
        }
    }
}

pub struct LandmarkReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> LandmarkReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for LandmarkReader<R> {
    type Item = Result<Detection, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(e.into())),
            }

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            return Some(
                serde_json::from_str::<Vec<Vec<Point3>>>(text)
                    .map(Detection::from_faces)
                    .map_err(|source| PipelineError::Decode {
                        line: self.line,
                        source,
                    }),
            );
        }
    }
}

/// Open a file, or stdin when no path is given.
pub fn open(input: Option<&Path>) -> Result<LandmarkReader<Box<dyn BufRead + Send>>, PipelineError> {
    let reader: Box<dyn BufRead + Send> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    Ok(LandmarkReader::new(reader))
}
