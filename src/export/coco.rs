//! COCO-style instance segmentation annotations for generated composites.

use crate::{
    compose::assembler::CompositeSample,
    foundation::error::{SynthError, SynthResult},
    mask::contour::outer_boundary,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CocoCategory {
    pub supercategory: String,
    pub name: String,
    pub id: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CocoImage {
    pub id: u64,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CocoAnnotation {
    pub id: u64,
    pub image_id: u64,
    pub category_id: u64,
    /// `[x, y, w, h]` with `w`, `h` the mask's pixel extent.
    pub bbox: [f64; 4],
    /// One flattened `[x0, y0, x1, y1, ...]` polygon.
    pub segmentation: Vec<Vec<u32>>,
    pub area: f64,
    pub iscrowd: u8,
    pub ignore: u8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CocoDataset {
    pub categories: Vec<CocoCategory>,
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
}

impl Default for CocoDataset {
    fn default() -> Self {
        Self {
            categories: vec![CocoCategory {
                supercategory: "none".to_string(),
                name: "stroke".to_string(),
                id: STROKE_CATEGORY_ID,
            }],
            images: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

impl CocoDataset {
    pub fn to_json(&self) -> SynthResult<String> {
        serde_json::to_string(self).map_err(|e| SynthError::serde(e.to_string()))
    }
}

pub const STROKE_CATEGORY_ID: u64 = 0;

/// Accumulates samples into a [`CocoDataset`], assigning running image and annotation ids.
#[derive(Clone, Debug, Default)]
pub struct CocoBuilder {
    dataset: CocoDataset,
    next_image_id: u64,
    next_annotation_id: u64,
}

impl CocoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty dataset whose ids continue where `prev` stopped, so splits never share ids.
    pub fn continuing(prev: &CocoBuilder) -> Self {
        Self {
            dataset: CocoDataset::default(),
            next_image_id: prev.next_image_id,
            next_annotation_id: prev.next_annotation_id,
        }
    }

    /// Add one image entry plus one annotation per stroke. Returns the image's relative file
    /// name (`images/{id}-{stroke_count}.png`).
    pub fn push_sample(&mut self, sample: &CompositeSample) -> String {
        let image_id = self.next_image_id;
        self.next_image_id += 1;

        let file_name = format!("images/{image_id}-{}.png", sample.strokes.len());
        self.dataset.images.push(CocoImage {
            id: image_id,
            file_name: file_name.clone(),
            width: sample.image.width(),
            height: sample.image.height(),
        });

        for mask in &sample.strokes.masks {
            let Some(b) = mask.bounds() else {
                continue;
            };
            let (w, h) = b.span();
            let polygon = outer_boundary(mask)
                .into_iter()
                .flat_map(|(x, y)| [x, y])
                .collect();
            self.dataset.annotations.push(CocoAnnotation {
                id: self.next_annotation_id,
                image_id,
                category_id: STROKE_CATEGORY_ID,
                bbox: [
                    f64::from(b.min_x),
                    f64::from(b.min_y),
                    f64::from(w),
                    f64::from(h),
                ],
                segmentation: vec![polygon],
                area: mask.area() as f64,
                iscrowd: 0,
                ignore: 0,
            });
            self.next_annotation_id += 1;
        }

        file_name
    }

    pub fn dataset(&self) -> &CocoDataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> CocoDataset {
        self.dataset
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/coco.rs"]
mod tests;
