use crate::charts::{mapped_column, Mapping};
use crate::data::{is_numeric, Dataset};
use crate::legend;
use crate::palette::{ColorScale, DEFAULT_ACCENT};
use crate::scale::{AxisScale, LinearScale, PointScale, SqrtScale};
use crate::scene::{Axes, Frame, Mark, Scene, Shape, Stroke, ZoomSpace};
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
    let size_key = mapped_column(mapping, "size");

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
        AxisScale::Linear(LinearScale::from_column(data, x_key, (0.0, frame.width)).nice(10))
    } else {
        AxisScale::Point(PointScale::new(data.unique(x_key), (0.0, frame.width), 0.5))
    };
    let y_scale = if y_is_num {
        AxisScale::Linear(LinearScale::from_column(data, y_key, (frame.height, 0.0)).nice(10))
    } else {
        AxisScale::Point(PointScale::new(data.unique(y_key), (frame.height, 0.0), 0.5))
    };

    let color_scale = color_key.map(|key| ColorScale::build(data, key, options.color_scheme));
    let radius_scale = size_key.map(|key| SqrtScale::from_column(data, key, options.base_radius));

    let (Some(xi), Some(yi)) = (data.column_index(x_key), data.column_index(y_key)) else {
        return Ok(scene);
    };

    for (i, row) in data.rows.iter().enumerate() {
        let (Some(px), Some(py)) = (x_scale.position(&row[xi]), y_scale.position(&row[yi]))
        else {
            continue;
        };

        let r = match (radius_scale.as_ref(), size_key) {
            (Some(scale), Some(key)) => {
                let v = data.value(i, key).map(|v| v.coerce()).unwrap_or(0.0);
                scale.radius(v)
            }
            _ => options.base_radius,
        };

        let fill = match (&color_scale, color_key) {
            (Some(scale), Some(key)) => {
                scale.color(&data.value(i, key).map(|v| v.display()).unwrap_or_default())
            }
            _ => DEFAULT_ACCENT,
        };

        scene.marks.push(Mark {
            id: scene.marks.len(),
            shape: Shape::Circle {
                cx: frame.left + px,
                cy: frame.top + py,
                r,
            },
            fill,
            opacity: 0.8,
            stroke: Some(Stroke {
                color: crate::palette::Rgb(255, 255, 255),
                width: 1.0,
            }),
            tooltip: Some(format!(
                "{}\n{}: {}",
                row[xi].display(),
                y_key,
                row[yi].display()
            )),
        });
    }

    scene.axes = Some(Axes {
        x: x_scale.clone(),
        y: y_scale.clone(),
        show_grid: options.show_grid,
        grid_x: true,
        x_title: Some(options.x_title.clone().unwrap_or_else(|| x_key.to_string())),
        y_title: Some(options.y_title.clone().unwrap_or_else(|| y_key.to_string())),
        rotate_x_labels: !x_is_num,
    });

    if let Some(scale) = &color_scale {
        scene.legend = legend::build(scale, options.width, MARGIN_RIGHT, MARGIN_TOP);
    }

    if let (AxisScale::Linear(x), AxisScale::Linear(y)) = (&x_scale, &y_scale) {
        scene.zoom = Some(ZoomSpace {
            x: x.clone(),
            y: y.clone(),
        });
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::mapping;
    use crate::data::Value;

    fn make_dataset() -> Dataset {
        Dataset::new(
            vec!["h".into(), "w".into(), "species".into(), "mass".into()],
            vec![
                vec![
                    Value::Number(1.0),
                    Value::Number(10.0),
                    Value::Text("a".into()),
                    Value::Number(4.0),
                ],
                vec![
                    Value::Number(2.0),
                    Value::Number(20.0),
                    Value::Text("b".into()),
                    Value::Number(9.0),
                ],
            ],
        )
    }

    #[test]
    fn test_scatter_one_circle_per_row() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "h"), ("y", "w")]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(scene.marks.len(), 2);
        assert!(scene
            .marks
            .iter()
            .all(|m| matches!(m.shape, Shape::Circle { .. })));
    }

    #[test]
    fn test_scatter_numeric_axes_enable_zoom() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "h"), ("y", "w")]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(scene.zoom.is_some());
    }

    #[test]
    fn test_scatter_categorical_x_disables_zoom_and_rotates_labels() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "species"), ("y", "w")]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(scene.zoom.is_none());
        assert!(scene.axes.as_ref().unwrap().rotate_x_labels);
    }

    #[test]
    fn test_scatter_constant_radius_without_size_mapping() {
        let options = RenderOptions::default();
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "h"), ("y", "w")]),
            &options,
        )
        .unwrap();
        for mark in &scene.marks {
            if let Shape::Circle { r, .. } = mark.shape {
                assert_eq!(r, options.base_radius);
            }
        }
    }

    #[test]
    fn test_scatter_size_mapping_uses_sqrt_range() {
        let options = RenderOptions::default();
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "h"), ("y", "w"), ("size", "mass")]),
            &options,
        )
        .unwrap();
        let radii: Vec<f64> = scene
            .marks
            .iter()
            .map(|m| match m.shape {
                Shape::Circle { r, .. } => r,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(radii[0], 3.0);
        assert_eq!(radii[1], options.base_radius * 3.0);
    }

    #[test]
    fn test_scatter_color_mapping_builds_legend() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "h"), ("y", "w"), ("color", "species")]),
            &RenderOptions::default(),
        )
        .unwrap();
        let legend = scene.legend.unwrap();
        assert_eq!(legend.entries.len(), 2);
        assert_ne!(scene.marks[0].fill, scene.marks[1].fill);
    }

    #[test]
    fn test_scatter_tooltip_text() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "h"), ("y", "w")]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(scene.marks[0].tooltip.as_deref(), Some("1\nw: 10"));
    }
}
