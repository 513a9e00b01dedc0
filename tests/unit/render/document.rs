use super::*;
use crate::strokes::path::StrokeSource;

#[test]
fn svg_document_lists_each_stroke_with_transform() {
    let strokes = vec![
        TransformedStroke::new(
            StrokePath::parse(
                StrokeSource::Builtin(2),
                "M703 378l-64 21c-8 -47 -32 -118 -53 -173l61 -18c23 54 47 124 56 170z",
            )
            .unwrap(),
            AffineParams {
                translate_x: 12.0,
                translate_y: 134.0,
                rotate_deg: -3.0,
                skew_x_deg: 3.0,
                skew_y_deg: -1.0,
                scale_x: 0.3,
                scale_y: 1.7,
            },
        ),
        TransformedStroke::new(
            StrokePath::parse(
                StrokeSource::Builtin(3),
                "M849 191l65 19c-32 75 -76 163 -113 220c-13 -9 -43 -23 -60 -30c40 -56 81 -137 108 -209z",
            )
            .unwrap(),
            AffineParams {
                translate_x: -2.0,
                translate_y: 232.0,
                rotate_deg: -3.0,
                skew_x_deg: -12.0,
                skew_y_deg: 0.0,
                scale_x: 1.0,
                scale_y: 0.9,
            },
        ),
    ];

    let svg = render_svg(&strokes, &ViewBox::default());
    let expected = "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" viewBox=\"-10 0 1010 1000\">\n\
<path d=\"M703 378l-64 21c-8 -47 -32 -118 -53 -173l61 -18c23 54 47 124 56 170z\" transform=\"translate(12, 134) rotate(-3) skewX(3) skewY(-1) scale(0.3, 1.7)\"/>\n\
<path d=\"M849 191l65 19c-32 75 -76 163 -113 220c-13 -9 -43 -23 -60 -30c40 -56 81 -137 108 -209z\" transform=\"translate(-2, 232) rotate(-3) skewX(-12) skewY(0) scale(1, 0.9)\"/>\n\
</svg>";
    assert_eq!(svg, expected);
}

#[test]
fn empty_document_is_still_valid_svg() {
    let svg = render_svg(&[], &ViewBox::default());
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
}
