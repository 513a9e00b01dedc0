use crate::{
    foundation::core::ViewBox, sampling::affine::AffineParams, strokes::path::StrokePath,
};

/// A stroke outline together with its placement on the canvas.
#[derive(Clone, Debug)]
pub struct TransformedStroke {
    pub stroke: StrokePath,
    pub params: AffineParams,
}

impl TransformedStroke {
    pub fn new(stroke: StrokePath, params: AffineParams) -> Self {
        Self { stroke, params }
    }
}

/// Build an SVG document drawing every stroke with its transform inside `viewbox`.
///
/// Paths use the default fill, so every stroke is painted opaque black and the alpha channel of
/// the rendered image carries the ink coverage.
pub fn render_svg(strokes: &[TransformedStroke], viewbox: &ViewBox) -> String {
    let paths = strokes
        .iter()
        .map(|s| {
            format!(
                "<path d=\"{}\" transform=\"{}\"/>",
                escape_attr(s.stroke.d()),
                s.params.to_svg_transform()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" viewBox=\"{}\">\n{}\n</svg>",
        viewbox.to_svg_attr(),
        paths
    )
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
#[path = "../../tests/unit/render/document.rs"]
mod tests;
