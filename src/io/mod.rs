//! Plain-text encodings of generated profiles for external builders.

use crate::float_types::Real;
use crate::parameters::ParameterSet;
use crate::profile::Profile;
use crate::template::POINT_COUNT;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Generic I/O and format‑conversion errors.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),
    ParseFloat(std::num::ParseFloatError),
    Json(serde_json::Error),

    MalformedInput(String),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            ParseFloat(error) => write!(f, "Could not parse float: {error}"),
            Json(error) => write!(f, "JSON error: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            IoError::ParseFloat(error) => Some(error),
            IoError::Json(error) => Some(error),
            IoError::MalformedInput(_) => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<std::num::ParseFloatError> for IoError {
    fn from(value: std::num::ParseFloatError) -> Self {
        Self::ParseFloat(value)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

const CSV_HEADER: &str = "index,x,y";

/// Convert a profile to CSV: a `index,x,y` header followed by one row per point.
///
/// ```rust
/// # use solid_profile::{io, profile::ProfileGenerator, parameters::ParameterSet};
/// let profile = ProfileGenerator::default().generate(&ParameterSet::default());
/// let csv = io::to_csv(&profile);
/// assert_eq!(csv.lines().count(), 26);
/// ```
pub fn to_csv(profile: &Profile) -> String {
    let mut out = String::with_capacity(32 * (POINT_COUNT + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for (i, p) in profile.points().iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(out, "{i},{},{}", p.x, p.y);
    }
    out
}

/// Parse the output of [`to_csv`] back into a profile.
///
/// Rows may come in any order but every index `0..25` must appear exactly once.
pub fn from_csv(text: &str) -> Result<Profile, IoError> {
    let mut slots: [Option<Point2<Real>>; POINT_COUNT] = [None; POINT_COUNT];
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        Some(header) if header == CSV_HEADER => {},
        other => {
            return Err(IoError::MalformedInput(format!(
                "expected header {CSV_HEADER:?}, found {other:?}"
            )));
        },
    }

    for line in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [index, x, y] = fields[..] else {
            return Err(IoError::MalformedInput(format!(
                "expected 3 fields, found {} in {line:?}",
                fields.len()
            )));
        };
        let index: usize = index
            .parse()
            .map_err(|_| IoError::MalformedInput(format!("bad point index {index:?}")))?;
        let slot = slots.get_mut(index).ok_or_else(|| {
            IoError::MalformedInput(format!("point index {index} is out of range"))
        })?;
        if slot.is_some() {
            return Err(IoError::MalformedInput(format!("point index {index} repeated")));
        }
        *slot = Some(Point2::new(x.parse()?, y.parse()?));
    }

    let mut points = [Point2::origin(); POINT_COUNT];
    for (i, slot) in slots.iter().enumerate() {
        points[i] =
            slot.ok_or_else(|| IoError::MalformedInput(format!("point index {i} missing")))?;
    }
    Ok(Profile::from_points(points))
}

/// A profile together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub parameters: ParameterSet,
    pub profile: Profile,
}

pub fn to_json(document: &ProfileDocument) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn from_json(text: &str) -> Result<ProfileDocument, IoError> {
    Ok(serde_json::from_str(text)?)
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
