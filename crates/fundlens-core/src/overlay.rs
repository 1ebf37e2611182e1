//! Overlay geometry.
//!
//! Bbox coordinates live on a normalized grid (0–1000 by default) per page
//! image. Renderers need percentages or pixels; both are a linear scale.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::field::resolve_location;
use crate::highlight::{locate, BBox, Highlight};
use crate::node::Node;

/// Extent of the normalized grid used by extraction engines.
pub const DEFAULT_GRID_EXTENT: f64 = 1000.0;

/// Overlay settings, usually read from the host application's config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    /// Coordinate of the far page edge on the normalized grid.
    pub grid_extent: f64,
    /// Clip rectangles to the page.
    pub clamp: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            grid_extent: DEFAULT_GRID_EXTENT,
            clamp: true,
        }
    }
}

/// Rectangle in percent of the page image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Rectangle in pixels of a concrete page image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayRect {
    /// Scale a bbox to page percentages.
    ///
    /// Zero-size boxes stay zero-size and inverted boxes collapse to zero
    /// extent instead of going negative.
    pub fn from_bbox(bbox: &BBox, options: &OverlayOptions) -> Self {
        let extent = if options.grid_extent > 0.0 {
            options.grid_extent
        } else {
            DEFAULT_GRID_EXTENT
        };
        let pct = |v: f64| v / extent * 100.0;

        let mut top = pct(bbox.ymin());
        let mut left = pct(bbox.xmin());
        let mut bottom = pct(bbox.ymax()).max(top);
        let mut right = pct(bbox.xmax()).max(left);

        if options.clamp {
            top = top.clamp(0.0, 100.0);
            left = left.clamp(0.0, 100.0);
            bottom = bottom.clamp(top, 100.0);
            right = right.clamp(left, 100.0);
        }

        Self {
            top,
            left,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelRect {
        let w = f64::from(image_width) / 100.0;
        let h = f64::from(image_height) / 100.0;
        PixelRect {
            x: self.left * w,
            y: self.top * h,
            width: self.width * w,
            height: self.height * h,
        }
    }
}

/// The field the operator currently points at in the data panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Focus {
    pub page: u64,
    pub bbox: BBox,
}

impl Focus {
    /// Focus on a field, when it carries a valid location.
    pub fn of(field: &Node) -> Option<Focus> {
        let location = resolve_location(field)?;
        Some(Focus {
            page: location.page_number()?,
            bbox: BBox(location.bbox()?.map(Number::clone)),
        })
    }
}

/// One drawable box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayBox {
    pub highlight: Highlight,
    pub rect: OverlayRect,
    pub emphasized: bool,
}

/// Everything drawn on top of one page image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOverlay {
    pub page: u64,
    pub boxes: Vec<OverlayBox>,
}

impl PageOverlay {
    pub fn build(tree: &Node, page: u64, options: &OverlayOptions, focus: Option<&Focus>) -> Self {
        let boxes = locate(tree, page)
            .into_iter()
            .map(|highlight| {
                let emphasized =
                    focus.is_some_and(|f| f.page == page && f.bbox == highlight.bbox);
                OverlayBox {
                    rect: OverlayRect::from_bbox(&highlight.bbox, options),
                    highlight,
                    emphasized,
                }
            })
            .collect();
        Self { page, boxes }
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
