use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{SynthError, SynthResult},
    strokes::path::{StrokePath, StrokeSource},
};

/// Single-stroke outlines that are not backed by a glyph file.
pub const BUILTIN_STROKE_PATHS: [&str; 7] = [
    "M884 65l34 62c-131 40 -349 62 -523 72c-2 -18 -10 -44 -18 -61c173 -12 387 -36 507 -73z",
    "M542 409 l-60 26c-14 -47 -46 -122 -74 -178l57 -22c30 56 63 127 77 174z",
    "M703 378l-64 21c-8 -47 -32 -118 -53 -173l61 -18c23 54 47 124 56 170z",
    "M849 191l65 19c-32 75 -76 163 -113 220c-13 -9 -43 -23 -60 -30c40 -56 81 -137 108 -209z",
    "M253 417v359c21 9 43 27 78 46c63 34 150 40 258 40c113 0 269 -7 370 -19c-10 22 -22 60 -24 83 c-78 5 -248 10 -349 10c-116 0 -202 -10 -270 -46c-41 -22 -73 -50 -95 -50c-34 0 -82 52 -129 108l-53 -71c48 -46 99 -84 142 -100v-290h-128v-70h200z",
    "M267 239l-62 45c-27 -45 -88 -111 -142 -158l58 -39c53 43 117 108 146 152z",
    "M268 753l113 -80c6 22 18 51 26 66c-186 137 -214 160 -228 178c-8 -18 -28 -51 -43 -66c21 -14 58 -48 58 -92v-331h-145v-72h219v397z",
];

/// CJK code points whose glyph consists of exactly one stroke.
pub const SINGLE_STROKE_CHARS: [char; 51] = [
    '一', '乙', '丨', '丶', '丿', '乀', '乁', '乚', '乛', '亅', '𠃊', '𠃋', '𠃌', '𠃍', '𠃑', '𠄌', '㇐',
    '㇀', '㇖', '㇇', '㇕', '㇆', '㇊', '㇅', '㇍', '㇈', '㇠', '㇎', '㇋', '㇌', '㇡', '㇑', '㇚', '㇙',
    '㇗', '㇄', '㇘', '㇟', '㇞', '㇉', '㇒', '㇓', '㇢', '㇜', '㇛', '㇔', '㇏', '㇝', '㇂', '㇃', '㇁',
];

/// Purely horizontal strokes.
pub const HORIZONTAL_STROKE_CHARS: [char; 2] = ['一', '㇐'];
/// Purely vertical strokes.
pub const VERTICAL_STROKE_CHARS: [char; 2] = ['丨', '㇑'];
/// Horizontal-then-down corner strokes (the top and right side of a box).
pub const BOXY_STROKE_CHARS: [char; 4] = ['㇕', '𠃍', '㇆', '𠃌'];

/// Structural role of a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrokeClass {
    General,
    Horizontal,
    Vertical,
    Boxy,
}

impl StrokeClass {
    pub fn of_char(c: char) -> Self {
        if HORIZONTAL_STROKE_CHARS.contains(&c) {
            Self::Horizontal
        } else if VERTICAL_STROKE_CHARS.contains(&c) {
            Self::Vertical
        } else if BOXY_STROKE_CHARS.contains(&c) {
            Self::Boxy
        } else {
            Self::General
        }
    }
}

/// Read-only stroke collection shared by every generator worker.
///
/// `general` holds every stroke; the horizontal, vertical and boxy subsets are disjoint and only
/// feed the boxy composition mode.
#[derive(Clone, Debug)]
pub struct StrokeLibrary {
    general: Vec<StrokePath>,
    horizontal: Vec<StrokePath>,
    vertical: Vec<StrokePath>,
    boxy: Vec<StrokePath>,
}

impl StrokeLibrary {
    /// Library made of the built-in outlines only. Boxy mode is unavailable.
    pub fn builtin() -> SynthResult<Self> {
        Self::from_parts(builtin_strokes()?, Vec::new(), Vec::new(), Vec::new())
    }

    pub fn from_parts(
        general: Vec<StrokePath>,
        horizontal: Vec<StrokePath>,
        vertical: Vec<StrokePath>,
        boxy: Vec<StrokePath>,
    ) -> SynthResult<Self> {
        if general.is_empty() {
            return Err(SynthError::library("stroke library has no strokes"));
        }
        Ok(Self {
            general,
            horizontal,
            vertical,
            boxy,
        })
    }

    /// Load the built-in outlines plus every single-stroke glyph from `glyph_dir`.
    ///
    /// Each glyph lives in `<glyph_dir>/<hex code point>.svg`. A missing file or a file without
    /// path data aborts the load.
    #[tracing::instrument(skip_all, fields(dir = %glyph_dir.display()))]
    pub fn load(glyph_dir: &Path) -> SynthResult<Self> {
        let mut general = builtin_strokes()?;
        let mut horizontal = Vec::new();
        let mut vertical = Vec::new();
        let mut boxy = Vec::new();

        for c in SINGLE_STROKE_CHARS {
            let stroke = load_stroke(glyph_dir, c)?;
            match StrokeClass::of_char(c) {
                StrokeClass::Horizontal => horizontal.push(stroke.clone()),
                StrokeClass::Vertical => vertical.push(stroke.clone()),
                StrokeClass::Boxy => boxy.push(stroke.clone()),
                StrokeClass::General => {}
            }
            general.push(stroke);
        }

        tracing::info!(
            general = general.len(),
            horizontal = horizontal.len(),
            vertical = vertical.len(),
            boxy = boxy.len(),
            "loaded stroke library"
        );
        Self::from_parts(general, horizontal, vertical, boxy)
    }

    pub fn general(&self) -> &[StrokePath] {
        &self.general
    }

    pub fn horizontal(&self) -> &[StrokePath] {
        &self.horizontal
    }

    pub fn vertical(&self) -> &[StrokePath] {
        &self.vertical
    }

    pub fn boxy(&self) -> &[StrokePath] {
        &self.boxy
    }

    pub fn supports_boxy(&self) -> bool {
        !(self.horizontal.is_empty() || self.vertical.is_empty() || self.boxy.is_empty())
    }
}

fn builtin_strokes() -> SynthResult<Vec<StrokePath>> {
    BUILTIN_STROKE_PATHS
        .iter()
        .enumerate()
        .map(|(i, d)| StrokePath::parse(StrokeSource::Builtin(i), *d))
        .collect()
}

/// Glyph file for a code point, e.g. `4e00.svg` for `一`.
pub fn glyph_file_for_char(glyph_dir: &Path, c: char) -> PathBuf {
    glyph_dir.join(format!("{:x}.svg", u32::from(c)))
}

/// Load the single stroke outline of `c` from its glyph file.
pub fn load_stroke(glyph_dir: &Path, c: char) -> SynthResult<StrokePath> {
    let file = glyph_file_for_char(glyph_dir, c);
    let svg = std::fs::read_to_string(&file)
        .with_context(|| format!("read glyph svg '{}'", file.display()))
        .map_err(|e| SynthError::library(format!("{e:#}")))?;
    let d = extract_path_data(&svg)?
        .ok_or_else(|| SynthError::library(format!("no SVG path found in char svg: {c}")))?;
    StrokePath::parse(StrokeSource::Glyph(c), d)
}

/// `d` attribute of the first `<path>` element in an SVG document.
pub fn extract_path_data(svg: &str) -> SynthResult<Option<String>> {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(svg, opts)
        .map_err(|e| SynthError::library(format!("parse glyph svg: {e}")))?;
    Ok(doc
        .descendants()
        .filter(|n| n.has_tag_name("path"))
        .find_map(|n| n.attribute("d"))
        .map(|d| d.replace(['\n', '\r'], " ")))
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/library.rs"]
mod tests;
