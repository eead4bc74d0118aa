//! Project persistence boundary: save and restore the whole working state
//! as one JSON document.
//!
//! On load, the persisted chart id is validated against the live registry;
//! an id that no longer resolves simply leaves the caller's current
//! archetype unchanged instead of erroring.

use crate::charts::{chart_by_id, ChartDef, Mapping};
use crate::data::Dataset;
use crate::RenderOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unix milliseconds at save time.
    pub timestamp: i64,
    pub data: Dataset,
    pub mapping: Mapping,
    pub options: RenderOptions,
    pub chart_id: String,
}

impl Project {
    pub fn new(
        timestamp: i64,
        data: Dataset,
        mapping: Mapping,
        options: RenderOptions,
        chart_id: &str,
    ) -> Self {
        Self {
            timestamp,
            data,
            mapping,
            options,
            chart_id: chart_id.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize project")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse project document")
    }

    /// The archetype this project was saved with, if it still exists in the
    /// registry. None means "keep whatever archetype is currently active".
    pub fn resolve_chart(&self) -> Option<&'static ChartDef> {
        chart_by_id(&self.chart_id)
    }
}

pub fn save<W: Write>(project: &Project, mut writer: W) -> Result<()> {
    let json = project.to_json()?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write project document")
}

pub fn load<R: Read>(mut reader: R) -> Result<Project> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read project document")?;
    Project::from_json(&text)
}
