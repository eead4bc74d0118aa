//! SVG serialization of a scene.
//!
//! The output is a self-contained vector document: explicit namespace
//! declaration and an opaque white background, so downstream rasterizers
//! can consume it without fixups.

use crate::axis;
use crate::legend;
use crate::scene::{Anchor, Mark, Scene, Shape, TextLabel};

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Point on a circle at `angle` radians from 12 o'clock, clockwise.
fn on_circle(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

/// Path data for an annular sector.
fn slice_path(cx: f64, cy: f64, inner: f64, outer: f64, start: f64, end: f64) -> String {
    let large = if end - start > std::f64::consts::PI { 1 } else { 0 };
    let (ox0, oy0) = on_circle(cx, cy, outer, start);
    let (ox1, oy1) = on_circle(cx, cy, outer, end);
    if inner <= 0.0 {
        return format!(
            "M{:.2},{:.2} A{:.2},{:.2} 0 {} 1 {:.2},{:.2} L{:.2},{:.2} Z",
            ox0, oy0, outer, outer, large, ox1, oy1, cx, cy
        );
    }
    let (ix0, iy0) = on_circle(cx, cy, inner, start);
    let (ix1, iy1) = on_circle(cx, cy, inner, end);
    format!(
        "M{:.2},{:.2} A{:.2},{:.2} 0 {} 1 {:.2},{:.2} L{:.2},{:.2} A{:.2},{:.2} 0 {} 0 {:.2},{:.2} Z",
        ox0, oy0, outer, outer, large, ox1, oy1, ix1, iy1, inner, inner, large, ix0, iy0
    )
}

fn write_mark(out: &mut Vec<String>, mark: &Mark) {
    let fill = mark.fill.to_hex();
    let stroke_attrs = match &mark.stroke {
        Some(s) => format!(
            " stroke=\"{}\" stroke-width=\"{:.1}\"",
            s.color.to_hex(),
            s.width
        ),
        None => String::new(),
    };
    match &mark.shape {
        Shape::Circle { cx, cy, r } => out.push(format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" opacity=\"{}\"{}/>",
            cx, cy, r, fill, mark.opacity, stroke_attrs
        )),
        Shape::Rect {
            x,
            y,
            width,
            height,
            corner,
        } => out.push(format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.1}\" fill=\"{}\" opacity=\"{}\"{}/>",
            x, y, width, height, corner, fill, mark.opacity, stroke_attrs
        )),
        Shape::Polyline { points, width } => {
            if points.is_empty() {
                return;
            }
            let d: String = points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    format!("{}{:.2},{:.2}", if i == 0 { "M" } else { "L" }, x, y)
                })
                .collect();
            out.push(format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.1}\" opacity=\"{}\"/>",
                d, fill, width, mark.opacity
            ));
        }
        Shape::Slice {
            cx,
            cy,
            inner,
            outer,
            start,
            end,
        } => out.push(format!(
            "<path d=\"{}\" fill=\"{}\" opacity=\"{}\"{}/>",
            slice_path(*cx, *cy, *inner, *outer, *start, *end),
            fill,
            mark.opacity,
            stroke_attrs
        )),
    }
}

fn write_label(out: &mut Vec<String>, label: &TextLabel) {
    let anchor = match label.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    let weight = if label.bold { " font-weight=\"bold\"" } else { "" };
    let transform = match label.rotate {
        Some(deg) => format!(
            " transform=\"rotate({:.0},{:.2},{:.2})\"",
            deg, label.x, label.y
        ),
        None => String::new(),
    };
    out.push(format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.0}px\" font-family=\"sans-serif\" fill=\"{}\" text-anchor=\"{}\"{}{}>{}</text>",
        label.x,
        label.y,
        label.size,
        label.fill.to_hex(),
        anchor,
        weight,
        transform,
        escape_xml(&label.text)
    ));
}

/// Serialize a scene to a self-contained SVG document.
pub fn document(scene: &Scene) -> String {
    let mut out: Vec<String> = Vec::new();
    out.push(format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\" style=\"background-color: white\">",
        scene.width, scene.height, scene.width, scene.height
    ));
    out.push(format!(
        "<rect x=\"0\" y=\"0\" width=\"{:.0}\" height=\"{:.0}\" fill=\"#ffffff\"/>",
        scene.width, scene.height
    ));

    if let Some(axes) = &scene.axes {
        let els = axis::elements(axes, &scene.frame);
        for line in &els.lines {
            out.push(format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.1}\" opacity=\"{}\"/>",
                line.x1, line.y1, line.x2, line.y2,
                line.color.to_hex(),
                line.width,
                line.opacity
            ));
        }
        for label in &els.labels {
            write_label(&mut out, label);
        }
    }

    for mark in &scene.marks {
        write_mark(&mut out, mark);
    }
    for label in &scene.labels {
        write_label(&mut out, label);
    }

    if let Some(block) = &scene.legend {
        let els = legend::elements(block);
        for swatch in &els.swatches {
            out.push(format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.0}\" height=\"{:.0}\" rx=\"{:.0}\" fill=\"{}\"/>",
                swatch.x,
                swatch.y,
                legend::SWATCH_SIZE,
                legend::SWATCH_SIZE,
                legend::SWATCH_CORNER,
                swatch.color.to_hex()
            ));
        }
        for label in &els.labels {
            write_label(&mut out, label);
        }
    }

    out.push("</svg>".to_string());
    out.join("\n")
}
