//! Axis, tick, grid and title placement.
//!
//! Backends call [`elements`] to expand a scene's `Axes` into plain lines
//! and labels. Running this at serialization time means a zoomed scene only
//! has to swap its scales and the ticks follow.

use crate::palette::Rgb;
use crate::scene::{Anchor, Axes, Frame, TextLabel};

const AXIS_COLOR: Rgb = Rgb(0, 0, 0);
const TITLE_COLOR: Rgb = Rgb(0x47, 0x55, 0x69);
const TICK_COUNT: usize = 10;
const TICK_LEN: f64 = 6.0;

/// A straight guide line (axis spine, tick, or grid line).
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Rgb,
    pub width: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisElements {
    pub lines: Vec<GuideLine>,
    pub labels: Vec<TextLabel>,
}

fn solid(x1: f64, y1: f64, x2: f64, y2: f64) -> GuideLine {
    GuideLine {
        x1,
        y1,
        x2,
        y2,
        color: AXIS_COLOR,
        width: 1.0,
        opacity: 1.0,
    }
}

fn grid(x1: f64, y1: f64, x2: f64, y2: f64) -> GuideLine {
    GuideLine {
        x1,
        y1,
        x2,
        y2,
        color: AXIS_COLOR,
        width: 1.0,
        opacity: 0.1,
    }
}

/// Expand axes into drawable primitives, positioned inside the frame.
pub fn elements(axes: &Axes, frame: &Frame) -> AxisElements {
    let mut out = AxisElements::default();
    let x0 = frame.left;
    let y0 = frame.top;
    let w = frame.width;
    let h = frame.height;
    let baseline = y0 + h;

    // Axis spines.
    out.lines.push(solid(x0, baseline, x0 + w, baseline));
    out.lines.push(solid(x0, y0, x0, baseline));

    // X ticks and labels.
    for (pos, label) in axes.x.ticks(TICK_COUNT) {
        let tx = x0 + pos;
        out.lines.push(solid(tx, baseline, tx, baseline + TICK_LEN));
        if axes.rotate_x_labels {
            out.labels.push(TextLabel {
                x: tx - 10.0,
                y: baseline + 12.0,
                text: label,
                size: 10.0,
                fill: AXIS_COLOR,
                anchor: Anchor::End,
                bold: false,
                rotate: Some(-45.0),
            });
        } else {
            out.labels.push(TextLabel {
                x: tx,
                y: baseline + 18.0,
                text: label,
                size: 10.0,
                fill: AXIS_COLOR,
                anchor: Anchor::Middle,
                bold: false,
                rotate: None,
            });
        }
        if axes.show_grid && axes.grid_x {
            out.lines.push(grid(tx, y0, tx, baseline));
        }
    }

    // Y ticks and labels.
    for (pos, label) in axes.y.ticks(TICK_COUNT) {
        let ty = y0 + pos;
        out.lines.push(solid(x0 - TICK_LEN, ty, x0, ty));
        out.labels.push(TextLabel {
            x: x0 - 9.0,
            y: ty + 3.0,
            text: label,
            size: 10.0,
            fill: AXIS_COLOR,
            anchor: Anchor::End,
            bold: false,
            rotate: None,
        });
        if axes.show_grid {
            out.lines.push(grid(x0, ty, x0 + w, ty));
        }
    }

    // Axis titles.
    if let Some(title) = &axes.x_title {
        out.labels.push(TextLabel {
            x: x0 + w / 2.0,
            y: baseline + 40.0,
            text: title.clone(),
            size: 12.0,
            fill: TITLE_COLOR,
            anchor: Anchor::Middle,
            bold: true,
            rotate: None,
        });
    }
    if let Some(title) = &axes.y_title {
        out.labels.push(TextLabel {
            x: x0 - 45.0,
            y: y0 + h / 2.0,
            text: title.clone(),
            size: 12.0,
            fill: TITLE_COLOR,
            anchor: Anchor::Middle,
            bold: true,
            rotate: Some(-90.0),
        });
    }

    out
}
