//! Scale resolution: data domains to pixel ranges.
//!
//! Scales are built fresh on every render call and never cached; a mapping
//! or options change invalidates all of them. Every constructor guards the
//! degenerate single-value domain so positions stay finite.

use crate::data::{Dataset, Value};

/// Step factor thresholds from the standard 1-2-5-10 tick progression.
const SQRT_50: f64 = 7.0710678118654755;
const SQRT_10: f64 = 3.1622776601683795;
const SQRT_2: f64 = 1.4142135623730951;

/// Pick a rounded tick step for a span and target tick count.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if span == 0.0 {
        return 0.0;
    }
    let step0 = span / count.max(1) as f64;
    let power = 10f64.powf(step0.log10().floor());
    let error = step0 / power;
    let factor = if error >= SQRT_50 {
        10.0
    } else if error >= SQRT_10 {
        5.0
    } else if error >= SQRT_2 {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Continuous position scale.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Build a scale over a numeric column's extent. Columns with no
    /// numeric values fall back to a unit domain.
    pub fn from_column(data: &Dataset, column: &str, range: (f64, f64)) -> Self {
        let domain = data.extent(column).unwrap_or((0.0, 1.0));
        Self::new(domain, range)
    }

    /// Expand the domain outward to rounded tick-step multiples. Used for
    /// axis scales only; size scales keep the raw extent.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        if start == stop {
            return self;
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        // Two passes, as the step itself can change after rounding.
        for _ in 0..2 {
            let step = tick_step(start, stop, count);
            if step <= 0.0 {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        }
        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Map a domain value to a pixel position. A degenerate domain maps
    /// everything to the middle of the range.
    pub fn position(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a pixel position back to a domain value.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Rounded tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut d0, mut d1) = self.domain;
        if d1 < d0 {
            std::mem::swap(&mut d0, &mut d1);
        }
        if d0 == d1 {
            return vec![d0];
        }
        let step = tick_step(d0, d1, count);
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }
        let start = (d0 / step).ceil() as i64;
        let stop = (d1 / step).floor() as i64;
        (start..=stop).map(|i| i as f64 * step).collect()
    }
}

/// Ordinal point scale: each category maps to a single position, with
/// symmetric outer padding expressed in step units.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    pub domain: Vec<String>,
    pub range: (f64, f64),
    pub padding: f64,
}

impl PointScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            domain,
            range,
            padding,
        }
    }

    pub fn step(&self) -> f64 {
        let n = self.domain.len();
        let slots = (n as f64 - 1.0 + 2.0 * self.padding).max(1.0);
        (self.range.1 - self.range.0) / slots
    }

    pub fn position(&self, value: &str) -> Option<f64> {
        let idx = self.domain.iter().position(|d| d == value)?;
        Some(self.range.0 + self.step() * (self.padding + idx as f64))
    }
}

/// Ordinal band scale: each category owns a band of pixels; `padding` is
/// both the inner and outer padding fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    pub domain: Vec<String>,
    pub range: (f64, f64),
    pub padding: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            domain,
            range,
            padding,
        }
    }

    pub fn step(&self) -> f64 {
        let n = self.domain.len();
        let slots = (n as f64 - self.padding + 2.0 * self.padding).max(1.0);
        (self.range.1 - self.range.0) / slots
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Leading edge of a category's band.
    pub fn position(&self, value: &str) -> Option<f64> {
        let idx = self.domain.iter().position(|d| d == value)?;
        let n = self.domain.len() as f64;
        let span = self.range.1 - self.range.0;
        // Center the used extent inside the range (align = 0.5).
        let start =
            self.range.0 + (span - self.step() * (n - self.padding)) * 0.5;
        Some(start + self.step() * idx as f64)
    }
}

/// Square-root size scale: area, not radius, is linear in the value.
#[derive(Debug, Clone, PartialEq)]
pub struct SqrtScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Build the radius scale for a size column: output range is
    /// `[3, base_radius * 3]` pixels.
    pub fn from_column(data: &Dataset, column: &str, base_radius: f64) -> Self {
        let domain = data.extent(column).unwrap_or((0.0, 1.0));
        Self::new(domain, (3.0, base_radius * 3.0))
    }

    pub fn radius(&self, value: f64) -> f64 {
        fn sgn_sqrt(v: f64) -> f64 {
            v.signum() * v.abs().sqrt()
        }
        let (d0, d1) = (sgn_sqrt(self.domain.0), sgn_sqrt(self.domain.1));
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (sgn_sqrt(value) - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// A positional axis scale, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Linear(LinearScale),
    Point(PointScale),
    Band(BandScale),
}

impl AxisScale {
    /// Pixel position for a record value: the point position for linear and
    /// point scales, the band center for band scales.
    pub fn position(&self, value: &Value) -> Option<f64> {
        match self {
            AxisScale::Linear(s) => value.as_number().map(|n| s.position(n)),
            AxisScale::Point(s) => s.position(&value.display()),
            AxisScale::Band(s) => s
                .position(&value.display())
                .map(|p| p + s.bandwidth() / 2.0),
        }
    }

    /// Tick positions and labels for axis rendering.
    pub fn ticks(&self, count: usize) -> Vec<(f64, String)> {
        match self {
            AxisScale::Linear(s) => s
                .ticks(count)
                .into_iter()
                .map(|v| (s.position(v), Value::Number(v).display()))
                .collect(),
            AxisScale::Point(s) => s
                .domain
                .iter()
                .filter_map(|d| s.position(d).map(|p| (p, d.clone())))
                .collect(),
            AxisScale::Band(s) => s
                .domain
                .iter()
                .filter_map(|d| {
                    s.position(d).map(|p| (p + s.bandwidth() / 2.0, d.clone()))
                })
                .collect(),
        }
    }

    pub fn as_linear(&self) -> Option<&LinearScale> {
        match self {
            AxisScale::Linear(s) => Some(s),
            _ => None,
        }
    }
}
