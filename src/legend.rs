//! Legend generation from a color scale.

use crate::palette::{ColorScale, Rgb};
use crate::scene::{Anchor, Legend, TextLabel};

/// Above this many entries a legend stops being legible and is suppressed.
const MAX_ENTRIES: usize = 20;

pub const SWATCH_SIZE: f64 = 12.0;
pub const ROW_HEIGHT: f64 = 20.0;
pub const SWATCH_CORNER: f64 = 2.0;

const LABEL_COLOR: Rgb = Rgb(0x33, 0x41, 0x55);

/// Build the legend block for a chart, positioned in the right margin.
/// Returns None when the domain is empty or too large to render legibly.
/// Always fed the same `ColorScale` instance that colors the marks.
pub fn build(scale: &ColorScale, width: f64, margin_right: f64, margin_top: f64) -> Option<Legend> {
    let n = scale.domain().len();
    if n == 0 || n > MAX_ENTRIES {
        return None;
    }
    Some(Legend {
        x: width - margin_right + 15.0,
        y: margin_top,
        entries: scale
            .entries()
            .map(|(label, color)| (label.to_string(), color))
            .collect(),
    })
}

/// One color swatch of the legend, as plain geometry for the backends.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendElements {
    pub swatches: Vec<Swatch>,
    pub labels: Vec<TextLabel>,
}

pub fn elements(legend: &Legend) -> LegendElements {
    let mut out = LegendElements::default();
    for (i, (label, color)) in legend.entries.iter().enumerate() {
        let row_y = legend.y + i as f64 * ROW_HEIGHT;
        out.swatches.push(Swatch {
            x: legend.x,
            y: row_y,
            color: *color,
        });
        out.labels.push(TextLabel {
            x: legend.x + 18.0,
            y: row_y + 10.0,
            text: label.clone(),
            size: 11.0,
            fill: LABEL_COLOR,
            anchor: Anchor::Start,
            bold: false,
            rotate: None,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Value};
    use crate::palette::Scheme;

    fn scale_with(n: usize) -> ColorScale {
        let data = Dataset::new(
            vec!["c".into()],
            (0..n)
                .map(|i| vec![Value::Text(format!("k{:02}", i))])
                .collect(),
        );
        ColorScale::build(&data, "c", Scheme::Tableau10)
    }

    #[test]
    fn test_legend_positioned_in_right_margin() {
        let legend = build(&scale_with(3), 800.0, 120.0, 20.0).unwrap();
        assert_eq!(legend.x, 695.0);
        assert_eq!(legend.y, 20.0);
        assert_eq!(legend.entries.len(), 3);
    }

    #[test]
    fn test_legend_suppressed_above_twenty_entries() {
        assert!(build(&scale_with(21), 800.0, 120.0, 20.0).is_none());
        assert!(build(&scale_with(20), 800.0, 120.0, 20.0).is_some());
    }

    #[test]
    fn test_legend_suppressed_when_empty() {
        assert!(build(&scale_with(0), 800.0, 120.0, 20.0).is_none());
    }

    #[test]
    fn test_legend_rows_spaced() {
        let legend = build(&scale_with(2), 800.0, 120.0, 20.0).unwrap();
        let els = elements(&legend);
        assert_eq!(els.swatches.len(), 2);
        assert_eq!(els.swatches[1].y - els.swatches[0].y, ROW_HEIGHT);
        assert_eq!(els.labels[0].x, legend.x + 18.0);
    }
}
