//! Interaction state layered on top of a rendered scene: hover highlight,
//! tooltip, and zoom/pan re-projection.
//!
//! Everything here is a pure function of a scene plus event data. The
//! tooltip is an explicit value owned by the caller, not ambient state, and
//! nothing in this module mutates the scene it is given.

use crate::scale::LinearScale;
use crate::scene::{Scene, Shape, Stroke};

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 20.0;

const DIM_OPACITY: f64 = 0.2;
const DIM_OPACITY_SLICE: f64 = 0.3;

/// Pixel offset a hovered pie slice moves outward.
pub const SLICE_HOVER_OFFSET: f64 = 10.0;

/// Visual override for one mark while a hover is active.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverStyle {
    pub id: usize,
    pub opacity: f64,
    pub stroke: Option<Stroke>,
    /// Radial offset for slices; zero for everything else.
    pub radial_offset: f64,
}

fn same_kind(a: &Shape, b: &Shape) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

/// Styles while `hovered` is under the pointer: the hovered mark comes to
/// full opacity with a highlight, marks of the same kind dim, everything
/// else keeps its baseline style (None entries).
pub fn hover_styles(scene: &Scene, hovered: usize) -> Vec<Option<HoverStyle>> {
    let Some(target) = scene.marks.iter().find(|m| m.id == hovered) else {
        return vec![None; scene.marks.len()];
    };

    scene
        .marks
        .iter()
        .map(|mark| {
            if mark.id == hovered {
                let is_slice = matches!(mark.shape, Shape::Slice { .. });
                Some(HoverStyle {
                    id: mark.id,
                    opacity: 1.0,
                    stroke: if is_slice {
                        mark.stroke.clone()
                    } else {
                        Some(Stroke {
                            color: crate::palette::Rgb(0, 0, 0),
                            width: 2.0,
                        })
                    },
                    radial_offset: if is_slice { SLICE_HOVER_OFFSET } else { 0.0 },
                })
            } else if same_kind(&mark.shape, &target.shape) {
                let dim = if matches!(mark.shape, Shape::Slice { .. }) {
                    DIM_OPACITY_SLICE
                } else {
                    DIM_OPACITY
                };
                Some(HoverStyle {
                    id: mark.id,
                    opacity: dim,
                    stroke: mark.stroke.clone(),
                    radial_offset: 0.0,
                })
            } else {
                None
            }
        })
        .collect()
}

/// The single reusable tooltip overlay. Owned by the caller and fed back in
/// on every pointer event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl Tooltip {
    /// Show the tooltip for a mark, positioned next to the pointer. Marks
    /// without tooltip text (line paths) hide it instead.
    pub fn show(&mut self, scene: &Scene, mark_id: usize, pointer: (f64, f64)) {
        match scene
            .marks
            .iter()
            .find(|m| m.id == mark_id)
            .and_then(|m| m.tooltip.clone())
        {
            Some(text) => {
                self.visible = true;
                self.text = text;
                self.track(pointer);
            }
            None => self.hide(),
        }
    }

    /// Follow the pointer while visible.
    pub fn track(&mut self, pointer: (f64, f64)) {
        self.x = pointer.0 + 15.0;
        self.y = pointer.1 - 10.0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// A continuous zoom/pan transform in plot pixel space. The scale factor is
/// clamped to [0.5, 20] on construction so a degenerate gesture can never
/// produce a degenerate render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl ZoomTransform {
    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self {
            k: k.clamp(ZOOM_MIN, ZOOM_MAX),
            x,
            y,
        }
    }

    pub fn identity() -> Self {
        Self { k: 1.0, x: 0.0, y: 0.0 }
    }

    pub fn apply_x(&self, px: f64) -> f64 {
        self.k * px + self.x
    }

    pub fn apply_y(&self, py: f64) -> f64 {
        self.k * py + self.y
    }

    /// Rescale an axis scale: same pixel range, domain re-derived from the
    /// visible window. The scale's own domain is never recomputed from data.
    fn rescale(&self, scale: &LinearScale, translate: f64) -> LinearScale {
        let (r0, r1) = scale.range;
        LinearScale::new(
            (
                scale.invert((r0 - translate) / self.k),
                scale.invert((r1 - translate) / self.k),
            ),
            scale.range,
        )
    }

    pub fn rescale_x(&self, scale: &LinearScale) -> LinearScale {
        self.rescale(scale, self.x)
    }

    pub fn rescale_y(&self, scale: &LinearScale) -> LinearScale {
        self.rescale(scale, self.y)
    }
}

/// Re-project a zoomable scene through a transform: mark positions move
/// affinely in plot space and the axes swap in rescaled scales so their
/// ticks follow. Non-zoomable scenes come back unchanged.
pub fn zoomed_scene(scene: &Scene, transform: &ZoomTransform) -> Scene {
    let Some(space) = &scene.zoom else {
        return scene.clone();
    };
    let t = ZoomTransform::new(transform.k, transform.x, transform.y);

    let left = scene.frame.left;
    let top = scene.frame.top;
    let project = |(px, py): (f64, f64)| {
        (
            left + t.apply_x(px - left),
            top + t.apply_y(py - top),
        )
    };

    let mut out = scene.clone();
    for mark in &mut out.marks {
        match &mut mark.shape {
            Shape::Circle { cx, cy, .. } => {
                let (nx, ny) = project((*cx, *cy));
                *cx = nx;
                *cy = ny;
            }
            Shape::Polyline { points, .. } => {
                for p in points.iter_mut() {
                    *p = project(*p);
                }
            }
            // Zoomable scenes only carry circles and polylines.
            Shape::Rect { .. } | Shape::Slice { .. } => {}
        }
    }

    if let Some(axes) = &mut out.axes {
        axes.x = crate::scale::AxisScale::Linear(t.rescale_x(&space.x));
        axes.y = crate::scale::AxisScale::Linear(t.rescale_y(&space.y));
    }

    out
}
