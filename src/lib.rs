// Library exports for plotforge

pub mod data;
pub mod ingest;
pub mod scale;
pub mod transform;
pub mod palette;
pub mod layout;
pub mod scene;
pub mod axis;
pub mod legend;
pub mod charts;
pub mod interact;
pub mod svg;
pub mod export;
pub mod project;

use crate::palette::Scheme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub enum OutputFormat {
    #[serde(rename = "svg")]
    #[default]
    Svg,
    #[serde(rename = "png")]
    Png,
}

/// Rendering options shared by every chart archetype. Every field has a
/// default so a partially specified options document never breaks scale or
/// color resolution downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    pub base_radius: f64,
    pub show_grid: bool,
    pub color_scheme: Scheme,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            base_radius: 6.0,
            show_grid: true,
            color_scheme: Scheme::Tableau10,
            x_title: None,
            y_title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts = RenderOptions::default();
        assert_eq!(opts.width, 800.0);
        assert_eq!(opts.height, 600.0);
        assert_eq!(opts.base_radius, 6.0);
        assert!(opts.show_grid);
        assert_eq!(opts.color_scheme, Scheme::Tableau10);
    }

    #[test]
    fn test_options_partial_json() {
        let opts: RenderOptions = serde_json::from_str(r#"{"width": 400}"#).unwrap();
        assert_eq!(opts.width, 400.0);
        assert_eq!(opts.height, 600.0);
        assert!(opts.x_title.is_none());
    }

    #[test]
    fn test_options_camel_case_fields() {
        let opts: RenderOptions =
            serde_json::from_str(r#"{"baseRadius": 10, "showGrid": false, "colorScheme": "viridis"}"#)
                .unwrap();
        assert_eq!(opts.base_radius, 10.0);
        assert!(!opts.show_grid);
        assert_eq!(opts.color_scheme, Scheme::Viridis);
    }
}
