//! The chart registry: a closed set of archetypes, each declaring the
//! dimensions it accepts and rendering through a pure function of
//! `(data, mapping, options)`.
//!
//! Error containment lives here: a missing required dimension or a failure
//! inside a render body degrades to an empty scene at [`render_chart`] and
//! never propagates to the caller.

mod bar;
mod line;
mod pie;
mod scatter;
mod treemap;

use crate::data::Dataset;
use crate::scene::Scene;
use crate::RenderOptions;
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// The user's column assignment: dimension id → ordered column names.
/// Treated as a full replacement on every update, never a diff.
pub type Mapping = BTreeMap<String, Vec<String>>;

/// First column mapped to a dimension, if any.
pub fn mapped_column<'a>(mapping: &'a Mapping, dimension: &str) -> Option<&'a str> {
    mapping
        .get(dimension)
        .and_then(|cols| cols.first())
        .map(|s| s.as_str())
}

/// What kind of values a dimension slot expects. Advisory for mapping UIs;
/// render bodies re-inspect the actual column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Text,
}

/// One mapping slot declared by an archetype.
#[derive(Debug, Clone)]
pub struct Dimension {
    pub id: &'static str,
    pub name: &'static str,
    pub expected: ValueKind,
    pub required: bool,
    pub allows_multiple: bool,
}

impl Dimension {
    const fn required(id: &'static str, name: &'static str, expected: ValueKind) -> Self {
        Self {
            id,
            name,
            expected,
            required: true,
            allows_multiple: false,
        }
    }

    const fn optional(id: &'static str, name: &'static str, expected: ValueKind) -> Self {
        Self {
            id,
            name,
            expected,
            required: false,
            allows_multiple: false,
        }
    }
}

/// The closed set of archetypes. Matched exhaustively wherever dimension
/// contracts are checked; adding a variant is a source-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Bar,
    Line,
    Pie,
    Treemap,
}

/// An immutable archetype definition, registered once for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct ChartDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub dimensions: Vec<Dimension>,
    pub kind: ChartKind,
}

impl ChartDef {
    /// Required dimensions with no column assigned.
    pub fn missing_required<'a>(&'a self, mapping: &Mapping) -> Vec<&'a Dimension> {
        self.dimensions
            .iter()
            .filter(|d| d.required && mapped_column(mapping, d.id).is_none())
            .collect()
    }
}

/// The ordered archetype registry, built on first use and read-only after.
pub fn registry() -> &'static [ChartDef] {
    static REGISTRY: OnceLock<Vec<ChartDef>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        vec![
            ChartDef {
                id: "scatterplot",
                name: "Scatter Plot",
                description: "Correlation with zoom & pan.",
                dimensions: vec![
                    Dimension::required("x", "X Axis", ValueKind::Number),
                    Dimension::required("y", "Y Axis", ValueKind::Number),
                    Dimension::optional("color", "Color", ValueKind::Text),
                    Dimension::optional("size", "Size", ValueKind::Number),
                ],
                kind: ChartKind::Scatter,
            },
            ChartDef {
                id: "barchart",
                name: "Bar Chart",
                description: "Comparison across categories.",
                dimensions: vec![
                    Dimension::required("x", "Category (X)", ValueKind::Text),
                    Dimension::required("y", "Height (Y)", ValueKind::Number),
                    Dimension::optional("color", "Color", ValueKind::Text),
                ],
                kind: ChartKind::Bar,
            },
            ChartDef {
                id: "linechart",
                name: "Line Chart",
                description: "Evolution over a continuous axis.",
                dimensions: vec![
                    Dimension::required("x", "X Axis (Time)", ValueKind::Number),
                    Dimension::required("y", "Y Axis (Value)", ValueKind::Number),
                    Dimension::optional("color", "Group", ValueKind::Text),
                ],
                kind: ChartKind::Line,
            },
            ChartDef {
                id: "piechart",
                name: "Pie Chart",
                description: "Part-to-whole comparison.",
                dimensions: vec![
                    Dimension::required("x", "Category", ValueKind::Text),
                    Dimension::required("y", "Value", ValueKind::Number),
                ],
                kind: ChartKind::Pie,
            },
            ChartDef {
                id: "treemap",
                name: "Treemap",
                description: "Hierarchy as nested rectangles.",
                dimensions: vec![
                    Dimension::required("x", "Group", ValueKind::Text),
                    Dimension::required("y", "Size", ValueKind::Number),
                    Dimension::optional("color", "Color", ValueKind::Text),
                ],
                kind: ChartKind::Treemap,
            },
        ]
    })
}

/// Look up an archetype by id.
pub fn chart_by_id(id: &str) -> Option<&'static ChartDef> {
    registry().iter().find(|def| def.id == id)
}

/// Render an archetype to a scene. This is the containment boundary of the
/// engine: a mapping that misses required dimensions yields an empty scene,
/// and any failure inside a render body is logged and suppressed so the
/// caller stays interactive.
pub fn render_chart(
    def: &ChartDef,
    data: &Dataset,
    mapping: &Mapping,
    options: &RenderOptions,
) -> Scene {
    if !def.missing_required(mapping).is_empty() {
        return Scene::empty(options.width, options.height);
    }

    match try_render(def, data, mapping, options) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("rendering '{}' failed: {:#}", def.id, e);
            Scene::empty(options.width, options.height)
        }
    }
}

fn try_render(
    def: &ChartDef,
    data: &Dataset,
    mapping: &Mapping,
    options: &RenderOptions,
) -> Result<Scene> {
    match def.kind {
        ChartKind::Scatter => scatter::render(data, mapping, options),
        ChartKind::Bar => bar::render(data, mapping, options),
        ChartKind::Line => line::render(data, mapping, options),
        ChartKind::Pie => pie::render(data, mapping, options),
        ChartKind::Treemap => treemap::render(data, mapping, options),
    }
}
