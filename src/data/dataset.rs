use log::warn;

use crate::data::labels;
use crate::data::rescale::FeatureRange;
use crate::data::row::DataRow;

/// Converts raw string rows into `DataRow`s.
///
/// The leading cell of each row is a letter label mapped to its alphabet
/// index; the remaining cells parse to `f64` and are rescaled against the
/// per-column `ranges`. Rows with an unknown label or an unparseable feature
/// are logged and dropped; one bad line must not sink the whole file.
pub fn build_rows(raw: &[Vec<String>], ranges: &[FeatureRange]) -> Vec<DataRow> {
    let mut rows = Vec::with_capacity(raw.len());

    'rows: for (line, cells) in raw.iter().enumerate() {
        let label_cell = match cells.first() {
            Some(cell) => cell,
            None => continue,
        };
        let label = match labels::letter_to_index(label_cell) {
            Some(label) => label,
            None => {
                warn!("line {}: '{}' is not a letter label", line + 1, label_cell);
                continue;
            }
        };

        let mut features = Vec::with_capacity(cells.len() - 1);
        for (i, cell) in cells.iter().skip(1).enumerate() {
            match cell.trim().parse::<f64>() {
                Ok(x) => {
                    let scaled = match ranges.get(i) {
                        Some(range) => range.rescale(x),
                        None => x,
                    };
                    features.push(scaled);
                }
                Err(_) => {
                    warn!("line {}: '{}' is not a number", line + 1, cell);
                    continue 'rows;
                }
            }
        }

        rows.push(DataRow::new(label, features));
    }

    rows
}
