use log::warn;

/// Min-max rescaling: `x' = (x - min) / (max - min)`.
///
/// A degenerate column (`max == min`) passes `x` through unchanged rather
/// than dividing by zero.
pub fn rescale(x: f64, min: f64, max: f64) -> f64 {
    if max == min {
        x
    } else {
        (x - min) / (max - min)
    }
}

/// The observed value range of one feature column.
#[derive(Debug, Clone, Copy)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl Default for FeatureRange {
    fn default() -> Self {
        FeatureRange {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl FeatureRange {
    pub fn observe(&mut self, x: f64) {
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
    }

    pub fn rescale(&self, x: f64) -> f64 {
        rescale(x, self.min, self.max)
    }
}

/// Folds the feature columns of raw string rows into per-column ranges.
///
/// The leading cell of every row is the label and is skipped. Ranges grow to
/// fit the widest row seen, so training and validation sets can be scanned
/// into the same vector one after the other. Cells that do not parse as
/// numbers are logged and skipped.
pub fn observe_columns(ranges: &mut Vec<FeatureRange>, rows: &[Vec<String>]) {
    for row in rows {
        for (i, cell) in row.iter().skip(1).enumerate() {
            if i >= ranges.len() {
                ranges.resize_with(i + 1, FeatureRange::default);
            }
            match cell.trim().parse::<f64>() {
                Ok(x) => ranges[i].observe(x),
                Err(_) => warn!("ignoring non-numeric cell '{}' in column {}", cell, i + 1),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn degenerate_range_passes_values_through() {
        assert_eq!(rescale(7.5, 3.0, 3.0), 7.5);
    }

    #[test]
    fn values_inside_the_range_map_into_the_unit_interval() {
        for x in [2.0, 3.5, 5.0] {
            let scaled = rescale(x, 2.0, 5.0);
            assert!((0.0..=1.0).contains(&scaled), "{} -> {}", x, scaled);
        }
        assert_eq!(rescale(2.0, 2.0, 5.0), 0.0);
        assert_eq!(rescale(5.0, 2.0, 5.0), 1.0);
    }

    #[test]
    fn observe_tracks_min_and_max() {
        let mut range = FeatureRange::default();
        for x in [4.0, -1.0, 2.5] {
            range.observe(x);
        }
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 4.0);
        assert_eq!(range.rescale(1.5), 0.5);
    }

    #[test]
    fn observe_columns_skips_the_label_column() {
        let rows = raw(&[&["A", "1", "10"], &["B", "3", "20"]]);
        let mut ranges = Vec::new();
        observe_columns(&mut ranges, &rows);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].min, 1.0);
        assert_eq!(ranges[0].max, 3.0);
        assert_eq!(ranges[1].min, 10.0);
        assert_eq!(ranges[1].max, 20.0);
    }

    #[test]
    fn observe_columns_accumulates_across_sets() {
        let train = raw(&[&["A", "2"]]);
        let val = raw(&[&["B", "8"]]);
        let mut ranges = Vec::new();
        observe_columns(&mut ranges, &train);
        observe_columns(&mut ranges, &val);

        assert_eq!(ranges[0].min, 2.0);
        assert_eq!(ranges[0].max, 8.0);
    }

    #[test]
    fn observe_columns_ignores_unparseable_cells() {
        let rows = raw(&[&["A", "1"], &["B", "junk"], &["C", "5"]]);
        let mut ranges = Vec::new();
        observe_columns(&mut ranges, &rows);

        assert_eq!(ranges[0].min, 1.0);
        assert_eq!(ranges[0].max, 5.0);
    }
}
