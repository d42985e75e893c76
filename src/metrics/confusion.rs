/// A square tally of expected-vs-predicted class outcomes.
///
/// `cells[expected][predicted]` counts how often the classifier produced
/// `predicted` when `expected` was the true class, so correct classifications
/// accumulate on the diagonal. An optional label sequence (one label per
/// class) is used only for report headers.
pub struct ConfusionMatrix {
    cells: Vec<Vec<u32>>,
    labels: Option<Vec<String>>,
}

impl ConfusionMatrix {
    /// An all-zero `width` × `width` matrix with no display labels.
    pub fn new(width: usize) -> ConfusionMatrix {
        ConfusionMatrix {
            cells: vec![vec![0; width]; width],
            labels: None,
        }
    }

    /// An all-zero matrix with one display label per class.
    pub fn with_labels(width: usize, labels: Vec<String>) -> ConfusionMatrix {
        debug_assert_eq!(labels.len(), width);
        ConfusionMatrix {
            cells: vec![vec![0; width]; width],
            labels: Some(labels),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, expected: usize, predicted: usize) -> u32 {
        self.cells[expected][predicted]
    }

    /// Counts one classification outcome. Both indices must be below the
    /// matrix width.
    pub fn increment(&mut self, expected: usize, predicted: usize) {
        self.cells[expected][predicted] += 1;
    }

    /// Per-class accuracy in CSV form, one value per column.
    ///
    /// For each column `j` the diagonal cell is divided by the column total:
    /// the share of *predictions* of class `j` that were correct (precision,
    /// not recall, despite the row-major `[expected][predicted]` layout).
    /// Columns never predicted report the sentinel `N`.
    pub fn accuracy_report(&self) -> String {
        let mut report = String::new();

        if let Some(labels) = &self.labels {
            for label in labels {
                report.push_str(label);
                report.push(',');
            }
            report.push('\n');
        }

        for j in 0..self.width() {
            let total: u32 = (0..self.width()).map(|i| self.cells[i][j]).sum();
            if total == 0 {
                report.push_str("N,");
            } else {
                let accuracy = f64::from(self.cells[j][j]) / f64::from(total) * 100.0;
                report.push_str(&format!("{},", accuracy));
            }
        }
        report.push('\n');

        report
    }

    /// The whole matrix in CSV form, row-major, with row/column label
    /// prefixes when labels are set.
    pub fn matrix_report(&self) -> String {
        let mut report = String::new();

        if let Some(labels) = &self.labels {
            report.push_str(" ,");
            for label in labels {
                report.push_str(label);
                report.push(',');
            }
            report.push('\n');
        }

        for (i, row) in self.cells.iter().enumerate() {
            if let Some(labels) = &self.labels {
                report.push_str(&labels[i]);
                report.push(',');
            }
            for &cell in row {
                report.push_str(&format!("{},", cell));
            }
            report.push('\n');
        }

        report
    }
}
