use crate::charts::{mapped_column, Mapping};
use crate::data::Dataset;
use crate::layout::{pie_slices, slice_centroid};
use crate::palette::{ColorScale, Rgb};
use crate::scene::{Anchor, Mark, Scene, Shape, Stroke, TextLabel};
use crate::transform::rollup;
use crate::RenderOptions;
use anyhow::Result;

/// Gap between neighboring slices, radians.
const PAD_ANGLE: f64 = 0.01;

/// Slices narrower than this get no centroid label.
const LABEL_MIN_SPAN: f64 = 0.25;

const LABEL_MAX_CHARS: usize = 10;

pub(crate) fn render(data: &Dataset, mapping: &Mapping, options: &RenderOptions) -> Result<Scene> {
    let mut scene = Scene::empty(options.width, options.height);
    let (Some(cat_key), Some(val_key)) = (mapped_column(mapping, "x"), mapped_column(mapping, "y"))
    else {
        return Ok(scene);
    };

    let rolled = rollup(data, cat_key, val_key);
    if rolled.is_empty() {
        return Ok(scene);
    }

    let cx = options.width / 2.0;
    let cy = options.height / 2.0;
    let outer = (options.width.min(options.height)) / 2.0 - 20.0;
    let inner = options.base_radius * 4.0;

    let color_scale = ColorScale::build(data, cat_key, options.color_scheme);
    let slices = pie_slices(
        &rolled.iter().map(|r| r.value).collect::<Vec<_>>(),
        PAD_ANGLE,
    );

    for (entry, slice) in rolled.iter().zip(&slices) {
        scene.marks.push(Mark {
            id: scene.marks.len(),
            shape: Shape::Slice {
                cx,
                cy,
                inner,
                outer,
                start: slice.start,
                end: slice.end,
            },
            fill: color_scale.color(&entry.key),
            opacity: 1.0,
            stroke: Some(Stroke {
                color: Rgb(255, 255, 255),
                width: 2.0,
            }),
            tooltip: Some(format!("{}\n{}", entry.key, entry.value)),
        });

        if slice.span() > LABEL_MIN_SPAN {
            let (dx, dy) = slice_centroid(slice, inner, outer);
            scene.labels.push(TextLabel {
                x: cx + dx,
                y: cy + dy,
                text: entry.key.chars().take(LABEL_MAX_CHARS).collect(),
                size: 10.0,
                fill: Rgb(255, 255, 255),
                anchor: Anchor::Middle,
                bold: true,
                rotate: None,
            });
        }
    }

    Ok(scene)
}
