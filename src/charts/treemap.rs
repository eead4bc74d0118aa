use crate::charts::{mapped_column, Mapping};
use crate::data::Dataset;
use crate::layout::{treemap, CellLayout};
use crate::palette::{ColorScale, Rgb};
use crate::scene::{Anchor, Mark, Scene, Shape, TextLabel};
use crate::RenderOptions;
use anyhow::Result;

const PADDING_INNER: f64 = 1.0;
const PADDING_OUTER: f64 = 1.0;

/// Labels are suppressed below this pixel footprint.
const LABEL_MIN_WIDTH: f64 = 30.0;
const LABEL_MIN_HEIGHT: f64 = 20.0;

pub(crate) fn render(data: &Dataset, mapping: &Mapping, options: &RenderOptions) -> Result<Scene> {
    let mut scene = Scene::empty(options.width, options.height);
    let (Some(label_key), Some(size_key)) =
        (mapped_column(mapping, "x"), mapped_column(mapping, "y"))
    else {
        return Ok(scene);
    };
    let color_key = mapped_column(mapping, "color");

    let (Some(label_idx), Some(size_idx)) = (
        data.column_index(label_key),
        data.column_index(size_key),
    ) else {
        return Ok(scene);
    };

    // Every record is a leaf under one synthetic root; leaves are laid out
    // largest-first.
    let mut order: Vec<usize> = (0..data.rows.len()).collect();
    order.sort_by(|&a, &b| {
        let va = data.rows[a][size_idx].coerce();
        let vb = data.rows[b][size_idx].coerce();
        vb.partial_cmp(&va).unwrap_or(std::cmp::Ordering::Equal)
    });
    let values: Vec<f64> = order
        .iter()
        .map(|&i| data.rows[i][size_idx].coerce())
        .collect();

    let cells = treemap(
        &values,
        CellLayout {
            x0: 0.0,
            y0: 0.0,
            x1: options.width,
            y1: options.height,
        },
        PADDING_INNER,
        PADDING_OUTER,
    );

    // Color by the mapped color column, falling back to the label column.
    let color_col = color_key.unwrap_or(label_key);
    let color_scale = ColorScale::build(data, color_col, options.color_scheme);
    let color_idx = data.column_index(color_col);

    for (&row, cell) in order.iter().zip(&cells) {
        let label = data.rows[row][label_idx].display();
        let value = data.rows[row][size_idx].coerce();
        let fill = match color_idx {
            Some(ci) => color_scale.color(&data.rows[row][ci].display()),
            None => crate::palette::DEFAULT_ACCENT,
        };

        scene.marks.push(Mark {
            id: scene.marks.len(),
            shape: Shape::Rect {
                x: cell.x0,
                y: cell.y0,
                width: cell.width(),
                height: cell.height(),
                corner: 2.0,
            },
            fill,
            opacity: 0.8,
            stroke: None,
            tooltip: Some(format!("{}\nVal: {}", label, value)),
        });

        if cell.width() > LABEL_MIN_WIDTH && cell.height() > LABEL_MIN_HEIGHT {
            scene.labels.push(TextLabel {
                x: cell.x0 + 4.0,
                y: cell.y0 + 14.0,
                text: label,
                size: 10.0,
                fill: Rgb(255, 255, 255),
                anchor: Anchor::Start,
                bold: true,
                rotate: None,
            });
        }
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
            vec!["name".into(), "size".into(), "group".into()],
            vec![
                vec![
                    Value::Text("small".into()),
                    Value::Number(1.0),
                    Value::Text("g1".into()),
                ],
                vec![
                    Value::Text("large".into()),
                    Value::Number(6.0),
                    Value::Text("g2".into()),
                ],
                vec![
                    Value::Text("medium".into()),
                    Value::Number(3.0),
                    Value::Text("g1".into()),
                ],
            ],
        )
    }

    #[test]
    fn test_treemap_one_cell_per_record() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "name"), ("y", "size")]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(scene.marks.len(), 3);
    }

    #[test]
    fn test_treemap_largest_cell_first() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "name"), ("y", "size")]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(scene.marks[0].tooltip.as_deref(), Some("large\nVal: 6"));
        let areas: Vec<f64> = scene
            .marks
            .iter()
            .map(|m| match m.shape {
                Shape::Rect { width, height, .. } => width * height,
                _ => unreachable!(),
            })
            .collect();
        assert!(areas.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_treemap_colors_by_color_column_when_mapped() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "name"), ("y", "size"), ("color", "group")]),
            &RenderOptions::default(),
        )
        .unwrap();
        // "small" and "medium" share group g1 and therefore a fill color.
        let fills: Vec<_> = scene
            .marks
            .iter()
            .map(|m| (m.tooltip.clone().unwrap(), m.fill))
            .collect();
        let small = fills.iter().find(|(t, _)| t.starts_with("small")).unwrap();
        let medium = fills.iter().find(|(t, _)| t.starts_with("medium")).unwrap();
        let large = fills.iter().find(|(t, _)| t.starts_with("large")).unwrap();
        assert_eq!(small.1, medium.1);
        assert_ne!(small.1, large.1);
    }

    #[test]
    fn test_treemap_colors_by_label_without_color_mapping() {
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "name"), ("y", "size")]),
            &RenderOptions::default(),
        )
        .unwrap();
        let fills: Vec<_> = scene.marks.iter().map(|m| m.fill).collect();
        assert_ne!(fills[0], fills[1]);
    }

    #[test]
    fn test_treemap_small_cells_skip_labels() {
        // One dominant value forces the rest into slivers.
        let mut rows = vec![vec![
            Value::Text("huge".into()),
            Value::Number(10_000.0),
            Value::Null,
        ]];
        for i in 0..5 {
            rows.push(vec![
                Value::Text(format!("s{i}")),
                Value::Number(0.1),
                Value::Null,
            ]);
        }
        let data = Dataset::new(vec!["name".into(), "size".into(), "g".into()], rows);
        let scene = render(
            &data,
            &mapping(&[("x", "name"), ("y", "size")]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(scene.marks.len(), 6);
        assert_eq!(scene.labels.len(), 1);
        assert_eq!(scene.labels[0].text, "huge");
    }

    #[test]
    fn test_treemap_cells_stay_inside_canvas() {
        let options = RenderOptions::default();
        let scene = render(
            &make_dataset(),
            &mapping(&[("x", "name"), ("y", "size")]),
            &options,
        )
        .unwrap();
        for mark in &scene.marks {
            if let Shape::Rect { x, y, width, height, .. } = mark.shape {
                assert!(x >= 0.0 && y >= 0.0);
                assert!(x + width <= options.width);
                assert!(y + height <= options.height);
            }
        }
    }
}
