//! Data-side transforms shared by the chart archetypes: group-and-sum
//! rollup, series grouping, and positional sorting.

use crate::data::Dataset;
use std::collections::HashMap;

/// One rolled-up row: a group key and the summed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Rolled {
    pub key: String,
    pub value: f64,
}

/// Group records by `group_col` and sum `value_col` (non-numeric cells
/// coerce to 0). Output is sorted descending by value; equal values keep
/// first-seen key order. The ordering is user-visible — bars, slices and
/// treemap cells all read largest-first.
pub fn rollup(data: &Dataset, group_col: &str, value_col: &str) -> Vec<Rolled> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    let group_idx = data.column_index(group_col);
    let value_idx = data.column_index(value_col);
    let (group_idx, value_idx) = match (group_idx, value_idx) {
        (Some(g), Some(v)) => (g, v),
        _ => return Vec::new(),
    };

    for row in &data.rows {
        let key = row[group_idx].display();
        if !totals.contains_key(&key) {
            order.push(key.clone());
        }
        *totals.entry(key).or_insert(0.0) += row[value_idx].coerce();
    }

    let mut rolled: Vec<Rolled> = order
        .into_iter()
        .map(|key| {
            let value = totals[&key];
            Rolled { key, value }
        })
        .collect();

    // Stable sort: ties keep first-seen key order.
    rolled.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    rolled
}

/// One series of a multi-series chart: a group key and the row indices that
/// belong to it, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: String,
    pub rows: Vec<usize>,
}

/// Split row indices into series by a grouping column, first-seen key order.
/// With no grouping column every row lands in a single "default" series.
pub fn group_series(data: &Dataset, group_col: Option<&str>) -> Vec<Series> {
    let group_idx = group_col.and_then(|c| data.column_index(c));

    let Some(group_idx) = group_idx else {
        return vec![Series {
            key: "default".to_string(),
            rows: (0..data.rows.len()).collect(),
        }];
    };

    let mut series: Vec<Series> = Vec::new();
    for (i, row) in data.rows.iter().enumerate() {
        let key = row[group_idx].display();
        match series.iter_mut().find(|s| s.key == key) {
            Some(s) => s.rows.push(i),
            None => series.push(Series {
                key,
                rows: vec![i],
            }),
        }
    }
    series
}

/// Row indices sorted ascending by the numeric view of a column. Used by the
/// line archetype before path construction when x is numeric; categorical x
/// keeps dataset order.
pub fn sort_rows_by_numeric(data: &Dataset, column: &str) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..data.rows.len()).collect();
    let Some(idx) = data.column_index(column) else {
        return indices;
    };
    indices.sort_by(|&a, &b| {
        let va = data.rows[a][idx].coerce();
        let vb = data.rows[b][idx].coerce();
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Value};

    fn make_dataset() -> Dataset {
        Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![Value::Number(1.0), Value::Number(10.0)],
                vec![Value::Number(2.0), Value::Number(20.0)],
                vec![Value::Number(1.0), Value::Number(5.0)],
            ],
        )
    }

    #[test]
    fn test_rollup_sums_and_sorts_descending() {
        let data = make_dataset();
        let rolled = rollup(&data, "a", "b");
        assert_eq!(
            rolled,
            vec![
                Rolled { key: "2".into(), value: 20.0 },
                Rolled { key: "1".into(), value: 15.0 },
            ]
        );
    }

    #[test]
    fn test_rollup_conserves_total() {
        let data = make_dataset();
        let rolled = rollup(&data, "a", "b");
        let rolled_sum: f64 = rolled.iter().map(|r| r.value).sum();
        let raw_sum: f64 = data.column("b").map(|v| v.coerce()).sum();
        assert_eq!(rolled_sum, raw_sum);
    }

    #[test]
    fn test_rollup_ties_keep_first_seen_order() {
        let data = Dataset::new(
            vec!["k".into(), "v".into()],
            vec![
                vec![Value::Text("beta".into()), Value::Number(7.0)],
                vec![Value::Text("alpha".into()), Value::Number(7.0)],
            ],
        );
        let rolled = rollup(&data, "k", "v");
        assert_eq!(rolled[0].key, "beta");
        assert_eq!(rolled[1].key, "alpha");
    }

    #[test]
    fn test_rollup_non_numeric_coerces_to_zero() {
        let data = Dataset::new(
            vec!["k".into(), "v".into()],
            vec![
                vec![Value::Text("a".into()), Value::Text("oops".into())],
                vec![Value::Text("a".into()), Value::Number(3.0)],
            ],
        );
        let rolled = rollup(&data, "k", "v");
        assert_eq!(rolled, vec![Rolled { key: "a".into(), value: 3.0 }]);
    }

    #[test]
    fn test_rollup_unknown_column_is_empty() {
        let data = make_dataset();
        assert!(rollup(&data, "nope", "b").is_empty());
    }

    #[test]
    fn test_group_series_first_seen_order() {
        let data = Dataset::new(
            vec!["g".into()],
            vec![
                vec![Value::Text("y".into())],
                vec![Value::Text("x".into())],
                vec![Value::Text("y".into())],
            ],
        );
        let series = group_series(&data, Some("g"));
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].key, "y");
        assert_eq!(series[0].rows, vec![0, 2]);
        assert_eq!(series[1].key, "x");
    }

    #[test]
    fn test_group_series_without_column() {
        let data = make_dataset();
        let series = group_series(&data, None);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].key, "default");
        assert_eq!(series[0].rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_rows_by_numeric() {
        let data = Dataset::new(
            vec!["x".into()],
            vec![
                vec![Value::Number(3.0)],
                vec![Value::Number(1.0)],
                vec![Value::Number(2.0)],
            ],
        );
        assert_eq!(sort_rows_by_numeric(&data, "x"), vec![1, 2, 0]);
    }
}
