use crate::charts::{mapped_column, Mapping};
use crate::data::Dataset;
use crate::legend;
use crate::palette::{ColorScale, DEFAULT_ACCENT};
use crate::scale::{AxisScale, BandScale, LinearScale};
use crate::scene::{Axes, Frame, Mark, Scene, Shape};
use crate::transform::rollup;
use crate::RenderOptions;
use anyhow::Result;

const MARGIN_TOP: f64 = 20.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_LEFT: f64 = 60.0;

/// Inter-band padding fraction of the band scale.
const BAND_PADDING: f64 = 0.2;

pub(crate) fn render(data: &Dataset, mapping: &Mapping, options: &RenderOptions) -> Result<Scene> {
    let mut scene = Scene::empty(options.width, options.height);
    let (Some(x_key), Some(y_key)) = (mapped_column(mapping, "x"), mapped_column(mapping, "y"))
    else {
        return Ok(scene);
    };
    let color_key = mapped_column(mapping, "color");

    let rolled = rollup(data, x_key, y_key);
    if rolled.is_empty() {
        return Ok(scene);
    }

    let frame = Frame::new(
        options.width,
        options.height,
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_RIGHT,
        MARGIN_BOTTOM,
    );
    scene.frame = frame;

    let x_scale = BandScale::new(
        rolled.iter().map(|r| r.key.clone()).collect(),
        (0.0, frame.width),
        BAND_PADDING,
    );
    let y_max = rolled.iter().map(|r| r.value).fold(f64::MIN, f64::max);
    let y_scale = LinearScale::new((0.0, y_max), (frame.height, 0.0)).nice(10);

    let color_scale = color_key.map(|key| ColorScale::build(data, key, options.color_scheme));

    for entry in &rolled {
        let Some(x) = x_scale.position(&entry.key) else {
            continue;
        };
        let top = y_scale.position(entry.value);
        let fill = match &color_scale {
            Some(scale) => scale.color(&entry.key),
            None => DEFAULT_ACCENT,
        };
        scene.marks.push(Mark {
            id: scene.marks.len(),
            shape: Shape::Rect {
                x: frame.left + x,
                y: frame.top + top,
                width: x_scale.bandwidth(),
                height: (frame.height - top).max(0.0),
                corner: 2.0,
            },
            fill,
            opacity: 0.8,
            stroke: None,
            tooltip: Some(format!("{}\nTotal: {}", entry.key, entry.value)),
        });
    }

    let rotate_x_labels = rolled.len() > 10 || x_scale.bandwidth() < 40.0;
    scene.axes = Some(Axes {
        x: AxisScale::Band(x_scale),
        y: AxisScale::Linear(y_scale),
        show_grid: options.show_grid,
        grid_x: false,
        x_title: Some(options.x_title.clone().unwrap_or_else(|| x_key.to_string())),
        y_title: Some(options.y_title.clone().unwrap_or_else(|| y_key.to_string())),
        rotate_x_labels,
    });

    if let Some(scale) = &color_scale {
        scene.legend = legend::build(scale, options.width, MARGIN_RIGHT, MARGIN_TOP);
    }

    Ok(scene)
}
