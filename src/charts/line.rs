use crate::charts::{mapped_column, Mapping};
use crate::data::{is_numeric, Dataset};
use crate::legend;
use crate::palette::{ColorScale, Rgb, DEFAULT_ACCENT};
use crate::scale::{AxisScale, LinearScale, PointScale};
use crate::scene::{Axes, Frame, Mark, Scene, Shape, Stroke, ZoomSpace};
use crate::transform::group_series;
use crate::RenderOptions;
use anyhow::Result;

const MARGIN_TOP: f64 = 20.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 60.0;

pub(crate) fn render(data: &Dataset, mapping: &Mapping, options: &RenderOptions) -> Result<Scene> {
    let mut scene = Scene::empty(options.width, options.height);
    let (Some(x_key), Some(y_key)) = (mapped_column(mapping, "x"), mapped_column(mapping, "y"))
    else {
        return Ok(scene);
    };
    let color_key = mapped_column(mapping, "color");

    let (Some(x_idx), Some(y_idx)) = (data.column_index(x_key), data.column_index(y_key)) else {
        return Ok(scene);
    };

    let frame = Frame::new(
        options.width,
        options.height,
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_RIGHT,
        MARGIN_BOTTOM,
    );
    scene.frame = frame;

    let x_is_num = is_numeric(data, x_key);
    let y_is_num = is_numeric(data, y_key);

    let x_scale = if x_is_num {
        AxisScale::Linear(LinearScale::from_column(data, x_key, (0.0, frame.width)))
    } else {
        AxisScale::Point(PointScale::new(data.unique(x_key), (0.0, frame.width), 0.0))
    };
    let y_max = data
        .column(y_key)
        .map(|v| v.coerce())
        .fold(f64::MIN, f64::max);
    let y_scale = LinearScale::new((0.0, y_max.max(0.0)), (frame.height, 0.0)).nice(10);

    let color_scale = color_key.map(|key| ColorScale::build(data, key, options.color_scheme));

    let mut series = group_series(data, color_key);
    // Numeric x: sort each series' points by x before path construction.
    // Categorical x keeps first-seen dataset order.
    if x_is_num {
        for s in &mut series {
            s.rows.sort_by(|&a, &b| {
                let va = data.rows[a][x_idx].coerce();
                let vb = data.rows[b][x_idx].coerce();
                va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }

    // Paths first, dots on top.
    let mut dots: Vec<Mark> = Vec::new();
    for s in &series {
        let stroke_color = match &color_scale {
            Some(scale) => scale.color(&s.key),
            None => DEFAULT_ACCENT,
        };

        let mut points = Vec::with_capacity(s.rows.len());
        for &row in &s.rows {
            let Some(px) = x_scale.position(&data.rows[row][x_idx]) else {
                continue;
            };
            let py = y_scale.position(data.rows[row][y_idx].coerce());
            let point = (frame.left + px, frame.top + py);
            points.push(point);
            dots.push(Mark {
                id: 0,
                shape: Shape::Circle {
                    cx: point.0,
                    cy: point.1,
                    r: 3.0,
                },
                fill: stroke_color,
                opacity: 0.8,
                stroke: Some(Stroke {
                    color: Rgb(255, 255, 255),
                    width: 1.0,
                }),
                tooltip: Some(format!(
                    "{}\n{}",
                    data.rows[row][x_idx].display(),
                    data.rows[row][y_idx].display()
                )),
            });
        }

        scene.marks.push(Mark {
            id: 0,
            shape: Shape::Polyline { points, width: 2.5 },
            fill: stroke_color,
            opacity: 0.8,
            stroke: None,
            tooltip: None,
        });
    }
    scene.marks.extend(dots);
    for (i, mark) in scene.marks.iter_mut().enumerate() {
        mark.id = i;
    }

    scene.axes = Some(Axes {
        x: x_scale.clone(),
        y: AxisScale::Linear(y_scale.clone()),
        show_grid: options.show_grid,
        grid_x: false,
        x_title: Some(options.x_title.clone().unwrap_or_else(|| x_key.to_string())),
        y_title: Some(options.y_title.clone().unwrap_or_else(|| y_key.to_string())),
        rotate_x_labels: !x_is_num,
    });

    if let Some(scale) = &color_scale {
        scene.legend = legend::build(scale, options.width, MARGIN_RIGHT, MARGIN_TOP);
    }

    if x_is_num && y_is_num {
        if let AxisScale::Linear(x) = &x_scale {
            scene.zoom = Some(ZoomSpace {
                x: x.clone(),
                y: y_scale,
            });
        }
    }

    Ok(scene)
}
