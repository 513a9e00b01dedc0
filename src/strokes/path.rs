use std::sync::Arc;

use kurbo::Shape as _;

use crate::foundation::{
    core::{BezPath, Point, Rect},
    error::{SynthError, SynthResult},
};

/// Where a stroke outline came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StrokeSource {
    /// Index into the built-in outline table.
    Builtin(usize),
    /// Single-stroke CJK code point loaded from a glyph file.
    Glyph(char),
    /// Caller-supplied outline with a free-form label.
    Custom(String),
}

impl std::fmt::Display for StrokeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(i) => write!(f, "builtin#{i}"),
            Self::Glyph(c) => write!(f, "U+{:04X} '{c}'", u32::from(*c)),
            Self::Custom(label) => write!(f, "custom '{label}'"),
        }
    }
}

/// Immutable single-stroke outline in glyph-box coordinates.
///
/// Path data is kept verbatim for the SVG writer; the bounding box is computed once when the
/// path is parsed.
#[derive(Clone, Debug)]
pub struct StrokePath {
    source: StrokeSource,
    d: Arc<str>,
    bbox: Rect,
}

impl StrokePath {
    pub fn parse(source: StrokeSource, d: impl Into<Arc<str>>) -> SynthResult<Self> {
        let d = d.into();
        let path = BezPath::from_svg(&d).map_err(|e| {
            SynthError::library(format!("stroke {source}: invalid path data: {e}"))
        })?;
        if path.elements().is_empty() {
            return Err(SynthError::library(format!(
                "stroke {source}: path data is empty"
            )));
        }
        let bbox = path.bounding_box();
        if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
        {
            return Err(SynthError::library(format!(
                "stroke {source}: path bounds are not finite"
            )));
        }
        Ok(Self { source, d, bbox })
    }

    pub fn source(&self) -> &StrokeSource {
        &self.source
    }

    /// Raw SVG path data.
    pub fn d(&self) -> &str {
        &self.d
    }

    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    pub fn midpoint(&self) -> Point {
        self.bbox.center()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/path.rs"]
mod tests;
