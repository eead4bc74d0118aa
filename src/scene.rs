//! The immutable scene graph produced by one render call.
//!
//! A render call builds a complete `Scene` from scratch and the new value
//! fully replaces the previous one, so stale geometry can never leak across
//! renders. Backends (SVG, PNG) and the interaction layer consume the scene;
//! none of them can reach back into the data mapping.

use crate::palette::Rgb;
use crate::scale::{AxisScale, LinearScale};

/// Plot frame: outer canvas size minus the margins reserved for axes,
/// titles and the legend column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: (width - left - right).max(0.0),
            height: (height - top - bottom).max(0.0),
        }
    }

    /// Frame with no margins, for radial and space-filling charts.
    pub fn full(width: f64, height: f64) -> Self {
        Self::new(width, height, 0.0, 0.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
}

/// Geometry of a single interactive mark, in absolute pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner: f64,
    },
    /// Stroked polyline with no fill (line-chart paths).
    Polyline {
        points: Vec<(f64, f64)>,
        width: f64,
    },
    /// Annular sector. Angles are radians from 12 o'clock, clockwise.
    Slice {
        cx: f64,
        cy: f64,
        inner: f64,
        outer: f64,
        start: f64,
        end: f64,
    },
}

/// One drawable, hoverable element. The tooltip text is synthesized by the
/// archetype at render time; the interaction layer only echoes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub id: usize,
    pub shape: Shape,
    pub fill: Rgb,
    pub opacity: f64,
    pub stroke: Option<Stroke>,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Non-interactive text: data labels, tick labels, titles, legend text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub size: f64,
    pub fill: Rgb,
    pub anchor: Anchor,
    pub bold: bool,
    /// Rotation in degrees around (x, y), counter-clockwise negative.
    pub rotate: Option<f64>,
}

/// Cartesian axes attached to a scene. Backends expand these into tick
/// lines and labels via the axis module, so a zoomed scene regenerates its
/// ticks from the rescaled scales for free.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x: AxisScale,
    pub y: AxisScale,
    pub show_grid: bool,
    pub grid_x: bool,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub rotate_x_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub entries: Vec<(String, Rgb)>,
}

/// Present only on scenes that support zoom/pan: both axes continuous.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomSpace {
    pub x: LinearScale,
    pub y: LinearScale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub frame: Frame,
    pub marks: Vec<Mark>,
    pub labels: Vec<TextLabel>,
    pub axes: Option<Axes>,
    pub legend: Option<Legend>,
    pub zoom: Option<ZoomSpace>,
}

impl Scene {
    /// An empty scene: cleared canvas, nothing drawable. Produced whenever a
    /// required dimension is missing or a render body fails.
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            frame: Frame::full(width, height),
            marks: Vec::new(),
            labels: Vec::new(),
            axes: None,
            legend: None,
            zoom: None,
        }
    }

    /// True when the scene holds no drawable geometry.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.labels.is_empty() && self.axes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene_has_no_geometry() {
        let scene = Scene::empty(800.0, 600.0);
        assert!(scene.is_empty());
        assert_eq!(scene.width, 800.0);
        assert!(scene.legend.is_none());
        assert!(scene.zoom.is_none());
    }

    #[test]
    fn test_frame_dimensions() {
        let frame = Frame::new(800.0, 600.0, 60.0, 20.0, 120.0, 50.0);
        assert_eq!(frame.width, 620.0);
        assert_eq!(frame.height, 530.0);
    }

    #[test]
    fn test_frame_never_negative() {
        let frame = Frame::new(100.0, 50.0, 60.0, 20.0, 120.0, 50.0);
        assert_eq!(frame.width, 0.0);
        assert_eq!(frame.height, 0.0);
    }
}
