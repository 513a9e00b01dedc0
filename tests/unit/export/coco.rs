use super::*;
use crate::{
    compose::{assembler::StrokeSet, label::LabelMask},
    mask::geometry::Mask,
    render::{document::TransformedStroke, raster::RasterImage},
    sampling::affine::AffineParams,
    strokes::path::{StrokePath, StrokeSource},
};

fn sample_with(masks: Vec<Mask>) -> CompositeSample {
    let path = StrokePath::parse(StrokeSource::Custom("r".into()), "M0 0h10v10h-10z").unwrap();
    let strokes = masks
        .iter()
        .map(|_| TransformedStroke::new(path.clone(), AffineParams::default()))
        .collect();
    let label = LabelMask::from_masks(16, 16, &masks).unwrap();
    CompositeSample {
        image: RasterImage {
            ink: image::GrayImage::new(16, 16),
        },
        label,
        strokes: StrokeSet { strokes, masks },
        boxy: false,
        attempts: 2,
    }
}

fn rect(x0: u32, y0: u32, x1: u32, y1: u32) -> Mask {
    Mask::from_fn(16, 16, |x, y| x >= x0 && x <= x1 && y >= y0 && y <= y1)
}

#[test]
fn default_dataset_has_stroke_category() {
    let ds = CocoDataset::default();
    assert_eq!(ds.categories.len(), 1);
    assert_eq!(ds.categories[0].name, "stroke");
    assert_eq!(ds.categories[0].supercategory, "none");
    assert_eq!(ds.categories[0].id, 0);
}

#[test]
fn push_sample_annotates_each_stroke() {
    let mut builder = CocoBuilder::new();
    let name = builder.push_sample(&sample_with(vec![rect(1, 2, 5, 4), rect(8, 8, 8, 12)]));
    assert_eq!(name, "images/0-2.png");

    let ds = builder.dataset();
    assert_eq!(ds.images.len(), 1);
    assert_eq!((ds.images[0].width, ds.images[0].height), (16, 16));
    assert_eq!(ds.annotations.len(), 2);

    let a = &ds.annotations[0];
    assert_eq!(a.id, 0);
    assert_eq!(a.image_id, 0);
    assert_eq!(a.bbox, [1.0, 2.0, 5.0, 3.0]);
    assert_eq!(a.area, 15.0);
    assert_eq!(a.segmentation, vec![vec![1, 2, 5, 2, 5, 4, 1, 4]]);

    let b = &ds.annotations[1];
    assert_eq!(b.id, 1);
    assert_eq!(b.bbox, [8.0, 8.0, 1.0, 5.0]);
    assert_eq!(b.area, 5.0);
}

#[test]
fn single_pixel_stroke_has_unit_bbox() {
    let mut builder = CocoBuilder::new();
    builder.push_sample(&sample_with(vec![rect(6, 9, 6, 9)]));
    let a = &builder.dataset().annotations[0];
    assert_eq!(a.bbox, [6.0, 9.0, 1.0, 1.0]);
    assert_eq!(a.area, 1.0);
    assert_eq!(a.segmentation, vec![vec![6, 9]]);
}

#[test]
fn ids_run_across_samples_and_splits() {
    let mut train = CocoBuilder::new();
    train.push_sample(&sample_with(vec![rect(0, 0, 3, 3)]));
    let second = train.push_sample(&sample_with(vec![rect(0, 0, 3, 3), rect(5, 5, 9, 9)]));
    assert_eq!(second, "images/1-2.png");

    let mut val = CocoBuilder::continuing(&train);
    let third = val.push_sample(&sample_with(vec![rect(2, 2, 4, 4)]));
    assert_eq!(third, "images/2-1.png");
    assert_eq!(val.dataset().annotations[0].id, 3);
    assert_eq!(val.dataset().images.len(), 1);
    assert_eq!(train.into_dataset().annotations.len(), 3);
}

#[test]
fn json_uses_coco_field_names() {
    let mut builder = CocoBuilder::new();
    builder.push_sample(&sample_with(vec![rect(1, 1, 2, 2)]));
    let json = builder.dataset().to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    let ann = &v["annotations"][0];
    assert_eq!(ann["category_id"], 0);
    assert_eq!(ann["iscrowd"], 0);
    assert_eq!(ann["ignore"], 0);
    assert_eq!(v["images"][0]["file_name"], "images/0-1.png");
}
