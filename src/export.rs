//! Raster export: replay a scene onto a fixed-scale bitmap and encode PNG.
//!
//! The scene is drawn at a 2x linear upscale against an opaque white
//! background, then encoded with the `image` PNG encoder.

use crate::axis;
use crate::legend;
use crate::palette::Rgb;
use crate::scene::{Anchor, Scene, Shape, TextLabel};
use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Linear upscale factor for raster output sharpness.
pub const RASTER_SCALE: f64 = 2.0;

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn px(v: f64) -> i32 {
    (v * RASTER_SCALE).round() as i32
}

/// Sampled outline of an annular sector: outer arc forward, inner arc back.
fn sector_points(
    cx: f64,
    cy: f64,
    inner: f64,
    outer: f64,
    start: f64,
    end: f64,
) -> Vec<(i32, i32)> {
    let span = (end - start).max(0.0);
    let steps = ((span / 0.05).ceil() as usize).max(8);
    let mut points = Vec::with_capacity(2 * (steps + 1));
    for i in 0..=steps {
        let a = start + span * i as f64 / steps as f64;
        points.push((px(cx + outer * a.sin()), px(cy - outer * a.cos())));
    }
    if inner > 0.0 {
        for i in (0..=steps).rev() {
            let a = start + span * i as f64 / steps as f64;
            points.push((px(cx + inner * a.sin()), px(cy - inner * a.cos())));
        }
    } else {
        points.push((px(cx), px(cy)));
    }
    points
}

fn draw_label(
    root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    label: &TextLabel,
) -> Result<()> {
    let hpos = match label.anchor {
        Anchor::Start => HPos::Left,
        Anchor::Middle => HPos::Center,
        Anchor::End => HPos::Right,
    };
    let color = rgb(label.fill);
    let mut style = TextStyle::from(("sans-serif", label.size * RASTER_SCALE).into_font())
        .color(&color)
        .pos(Pos::new(hpos, VPos::Center));
    // The raster backend only supports quarter-turn text; the y-axis title
    // keeps its rotation, the diagonal tick labels draw horizontally.
    if label.rotate == Some(-90.0) {
        style = style.transform(FontTransform::Rotate270);
    }
    root.draw(&Text::new(label.text.clone(), (px(label.x), px(label.y)), style))
        .context("Failed to draw text")?;
    Ok(())
}

/// Rasterize a scene to PNG bytes at a 2x upscale on a white background.
pub fn to_png(scene: &Scene) -> Result<Vec<u8>> {
    let width = (scene.width * RASTER_SCALE).round() as u32;
    let height = (scene.height * RASTER_SCALE).round() as u32;
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).context("Failed to fill background")?;

        if let Some(axes) = &scene.axes {
            let els = axis::elements(axes, &scene.frame);
            for line in &els.lines {
                let style = ShapeStyle {
                    color: rgb(line.color).mix(line.opacity),
                    filled: false,
                    stroke_width: (line.width * RASTER_SCALE) as u32,
                };
                root.draw(&PathElement::new(
                    vec![(px(line.x1), px(line.y1)), (px(line.x2), px(line.y2))],
                    style,
                ))
                .context("Failed to draw guide line")?;
            }
            for label in &els.labels {
                draw_label(&root, label)?;
            }
        }

        for mark in &scene.marks {
            let fill = rgb(mark.fill).mix(mark.opacity);
            match &mark.shape {
                Shape::Circle { cx, cy, r } => {
                    root.draw(&Circle::new(
                        (px(*cx), px(*cy)),
                        (r * RASTER_SCALE) as i32,
                        fill.filled(),
                    ))
                    .context("Failed to draw circle")?;
                    if let Some(stroke) = &mark.stroke {
                        root.draw(&Circle::new(
                            (px(*cx), px(*cy)),
                            (r * RASTER_SCALE) as i32,
                            ShapeStyle {
                                color: rgb(stroke.color).mix(mark.opacity),
                                filled: false,
                                stroke_width: (stroke.width * RASTER_SCALE) as u32,
                            },
                        ))
                        .context("Failed to draw circle outline")?;
                    }
                }
                Shape::Rect {
                    x,
                    y,
                    width: w,
                    height: h,
                    ..
                } => {
                    root.draw(&Rectangle::new(
                        [(px(*x), px(*y)), (px(x + w), px(y + h))],
                        fill.filled(),
                    ))
                    .context("Failed to draw rect")?;
                }
                Shape::Polyline { points, width: w } => {
                    let path: Vec<(i32, i32)> =
                        points.iter().map(|(x, y)| (px(*x), px(*y))).collect();
                    root.draw(&PathElement::new(
                        path,
                        ShapeStyle {
                            color: fill,
                            filled: false,
                            stroke_width: (w * RASTER_SCALE) as u32,
                        },
                    ))
                    .context("Failed to draw path")?;
                }
                Shape::Slice {
                    cx,
                    cy,
                    inner,
                    outer,
                    start,
                    end,
                } => {
                    let outline = sector_points(*cx, *cy, *inner, *outer, *start, *end);
                    root.draw(&Polygon::new(outline.clone(), fill.filled()))
                        .context("Failed to draw slice")?;
                    if let Some(stroke) = &mark.stroke {
                        root.draw(&PathElement::new(
                            outline,
                            ShapeStyle {
                                color: rgb(stroke.color).to_rgba(),
                                filled: false,
                                stroke_width: (stroke.width * RASTER_SCALE) as u32,
                            },
                        ))
                        .context("Failed to draw slice outline")?;
                    }
                }
            }
        }

        for label in &scene.labels {
            draw_label(&root, label)?;
        }

        if let Some(block) = &scene.legend {
            let els = legend::elements(block);
            for swatch in &els.swatches {
                root.draw(&Rectangle::new(
                    [
                        (px(swatch.x), px(swatch.y)),
                        (
                            px(swatch.x + legend::SWATCH_SIZE),
                            px(swatch.y + legend::SWATCH_SIZE),
                        ),
                    ],
                    rgb(swatch.color).filled(),
                ))
                .context("Failed to draw legend swatch")?;
            }
            for label in &els.labels {
                draw_label(&root, label)?;
            }
        }

        root.present().context("Failed to present drawing")?;
    }

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(&buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}
