//! Color engine: categorical and sequential color scales.
//!
//! A `ColorScale`'s domain is the sorted unique values of the color-mapped
//! column — not the chart's plotted categories — and the same instance that
//! fills marks also drives the legend.

use crate::data::Dataset;
use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Fill used when no color dimension is mapped, and for values outside a
/// scale's derived domain.
pub const DEFAULT_ACCENT: Rgb = Rgb(0x3b, 0x82, 0xf6);

const TABLEAU10: [Rgb; 10] = [
    Rgb(0x4e, 0x79, 0xa7),
    Rgb(0xf2, 0x8e, 0x2c),
    Rgb(0xe1, 0x57, 0x59),
    Rgb(0x76, 0xb7, 0xb2),
    Rgb(0x59, 0xa1, 0x4f),
    Rgb(0xed, 0xc9, 0x48),
    Rgb(0xaf, 0x7a, 0xa1),
    Rgb(0xff, 0x9d, 0xa7),
    Rgb(0x9c, 0x75, 0x5f),
    Rgb(0xba, 0xb0, 0xab),
];

// Control points for the sequential ramps, evenly spaced over [0, 1].
const VIRIDIS: [Rgb; 5] = [
    Rgb(68, 1, 84),
    Rgb(59, 82, 139),
    Rgb(33, 145, 140),
    Rgb(94, 201, 98),
    Rgb(253, 231, 37),
];

const MAGMA: [Rgb; 5] = [
    Rgb(0, 0, 4),
    Rgb(81, 18, 124),
    Rgb(183, 55, 121),
    Rgb(252, 137, 97),
    Rgb(252, 253, 191),
];

/// The closed set of palettes. Unknown palette names at a boundary fall
/// back to `Tableau10` rather than extending this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "tableau10")]
    #[default]
    Tableau10,
    #[serde(rename = "viridis")]
    Viridis,
    #[serde(rename = "magma")]
    Magma,
}

impl std::str::FromStr for Scheme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "viridis" => Scheme::Viridis,
            "magma" => Scheme::Magma,
            _ => Scheme::Tableau10,
        })
    }
}

/// Piecewise-linear interpolation through a ramp's control points.
/// `t` is clamped to [0, 1].
fn interpolate(ramp: &[Rgb], t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let segments = (ramp.len() - 1) as f64;
    let pos = t * segments;
    let lo = (pos.floor() as usize).min(ramp.len() - 2);
    let frac = pos - lo as f64;
    let a = ramp[lo];
    let b = ramp[lo + 1];
    let mix = |x: u8, y: u8| -> u8 {
        (x as f64 + (y as f64 - x as f64) * frac).round() as u8
    };
    Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// A resolved value-to-color mapping with an enumerable domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: Vec<String>,
    colors: Vec<Rgb>,
}

impl ColorScale {
    /// Build a color scale for one column. Domain is the lexicographically
    /// sorted unique display values. Categorical palettes index cyclically;
    /// sequential palettes sample the ramp at `i / (n - 1)`, clamped to 0
    /// when the domain has a single entry.
    pub fn build(data: &Dataset, column: &str, scheme: Scheme) -> Self {
        let mut domain = data.unique(column);
        domain.sort();

        let n = domain.len();
        let colors = match scheme {
            Scheme::Tableau10 => (0..n).map(|i| TABLEAU10[i % TABLEAU10.len()]).collect(),
            Scheme::Viridis | Scheme::Magma => {
                let ramp: &[Rgb] = if scheme == Scheme::Viridis { &VIRIDIS } else { &MAGMA };
                let denom = (n.saturating_sub(1)).max(1) as f64;
                (0..n)
                    .map(|i| {
                        let t = if n <= 1 { 0.0 } else { i as f64 / denom };
                        interpolate(ramp, t)
                    })
                    .collect()
            }
        };

        Self { domain, colors }
    }

    /// Color for a value. Values outside the derived domain get the default
    /// accent color; the domain is never extended after construction.
    pub fn color(&self, value: &str) -> Rgb {
        match self.domain.iter().position(|d| d == value) {
            Some(i) => self.colors[i],
            None => DEFAULT_ACCENT,
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Domain entries paired with their colors, for legend generation.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.domain
            .iter()
            .map(|d| d.as_str())
            .zip(self.colors.iter().copied())
    }
}
