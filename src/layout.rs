//! Geometry-only layout algorithms: radial slice partitioning for pie
//! charts and squarified space partitioning for treemaps. Pure functions of
//! value lists and bounds; no data or style concerns.

/// Angular span of one pie slice, radians from 12 o'clock, clockwise.
/// Pad-angle is already applied at both boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceLayout {
    pub start: f64,
    pub end: f64,
}

impl SliceLayout {
    pub fn span(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Partition the full circle into contiguous slices proportional to the
/// given values, insetting each boundary by half the pad angle. A single
/// slice covers the whole circle with the pad applied at its own wrap-around
/// boundary only.
pub fn pie_slices(values: &[f64], pad_angle: f64) -> Vec<SliceLayout> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if values.is_empty() || total <= 0.0 {
        return values.iter().map(|_| SliceLayout { start: 0.0, end: 0.0 }).collect();
    }

    let full = std::f64::consts::TAU;
    let half_pad = pad_angle / 2.0;
    let mut slices = Vec::with_capacity(values.len());
    let mut angle = 0.0;
    for &v in values {
        let span = v.max(0.0) / total * full;
        let start = (angle + half_pad).min(angle + span / 2.0);
        let end = (angle + span - half_pad).max(angle + span / 2.0);
        slices.push(SliceLayout { start, end });
        angle += span;
    }
    slices
}

/// Centroid of an annular slice, relative to the circle center.
pub fn slice_centroid(slice: &SliceLayout, inner: f64, outer: f64) -> (f64, f64) {
    let mid = (slice.start + slice.end) / 2.0;
    let r = (inner + outer) / 2.0;
    (r * mid.sin(), -r * mid.cos())
}

/// One treemap cell in absolute pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl CellLayout {
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }
}

/// Squarified treemap of `values` (expected descending) inside the given
/// bounds. `padding_outer` insets the whole layout; `padding_inner` opens
/// gaps between neighboring cells. Cell areas are proportional to values.
pub fn treemap(
    values: &[f64],
    bounds: CellLayout,
    padding_inner: f64,
    padding_outer: f64,
) -> Vec<CellLayout> {
    let x0 = bounds.x0 + padding_outer;
    let y0 = bounds.y0 + padding_outer;
    let x1 = (bounds.x1 - padding_outer).max(x0);
    let y1 = (bounds.y1 - padding_outer).max(y0);

    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    // All-zero sizes degrade to an equal split rather than NaN geometry.
    let areas: Vec<f64> = if total > 0.0 {
        let scale = (x1 - x0) * (y1 - y0) / total;
        values.iter().map(|v| v.max(0.0) * scale).collect()
    } else {
        let each = (x1 - x0) * (y1 - y0) / n as f64;
        vec![each; n]
    };

    let mut cells = vec![
        CellLayout {
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
        };
        n
    ];
    squarify(&areas, 0, CellLayout { x0, y0, x1, y1 }, &mut cells);

    let inset = padding_inner / 2.0;
    for cell in &mut cells {
        let cx0 = cell.x0 + inset;
        let cy0 = cell.y0 + inset;
        cell.x0 = cx0;
        cell.y0 = cy0;
        cell.x1 = (cell.x1 - inset).max(cx0);
        cell.y1 = (cell.y1 - inset).max(cy0);
    }
    cells
}

/// Worst aspect ratio a row of areas would have when laid along a side of
/// length `side`.
fn worst_ratio(areas: &[f64], side: f64) -> f64 {
    let sum: f64 = areas.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let max = areas.iter().cloned().fold(f64::MIN, f64::max);
    let min = areas.iter().cloned().fold(f64::MAX, f64::min);
    let s2 = sum * sum;
    let w2 = side * side;
    if min <= 0.0 {
        return f64::INFINITY;
    }
    (w2 * max / s2).max(s2 / (w2 * min))
}

fn squarify(areas: &[f64], offset: usize, rect: CellLayout, out: &mut Vec<CellLayout>) {
    let remaining = &areas[offset..];
    if remaining.is_empty() {
        return;
    }

    let w = rect.width();
    let h = rect.height();
    let side = w.min(h);

    // Grow the row while the worst aspect ratio keeps improving.
    let mut take = 1;
    let mut best = worst_ratio(&remaining[..1], side);
    while take < remaining.len() {
        let next = worst_ratio(&remaining[..take + 1], side);
        if next > best {
            break;
        }
        best = next;
        take += 1;
    }

    let row_sum: f64 = remaining[..take].iter().sum();
    let thickness = if side > 0.0 { row_sum / side } else { 0.0 };

    if w >= h {
        // Lay the row as a vertical strip on the left.
        let mut y = rect.y0;
        for (i, &area) in remaining[..take].iter().enumerate() {
            let cell_h = if thickness > 0.0 { area / thickness } else { 0.0 };
            out[offset + i] = CellLayout {
                x0: rect.x0,
                y0: y,
                x1: rect.x0 + thickness,
                y1: y + cell_h,
            };
            y += cell_h;
        }
        let rest = CellLayout {
            x0: rect.x0 + thickness,
            y0: rect.y0,
            x1: rect.x1,
            y1: rect.y1,
        };
        squarify(areas, offset + take, rest, out);
    } else {
        // Horizontal strip along the top.
        let mut x = rect.x0;
        for (i, &area) in remaining[..take].iter().enumerate() {
            let cell_w = if thickness > 0.0 { area / thickness } else { 0.0 };
            out[offset + i] = CellLayout {
                x0: x,
                y0: rect.y0,
                x1: x + cell_w,
                y1: rect.y0 + thickness,
            };
            x += cell_w;
        }
        let rest = CellLayout {
            x0: rect.x0,
            y0: rect.y0 + thickness,
            x1: rect.x1,
            y1: rect.y1,
        };
        squarify(areas, offset + take, rest, out);
    }
}
