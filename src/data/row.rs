/// One labeled observation: a class index paired with its feature vector.
///
/// Rows are built once during data loading (label already mapped from its
/// letter, features already rescaled) and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    label: usize,
    features: Vec<f64>,
}

impl DataRow {
    pub fn new(label: usize, features: Vec<f64>) -> DataRow {
        DataRow { label, features }
    }

    /// The expected class index.
    pub fn label(&self) -> usize {
        self.label
    }

    /// The ordered feature vector.
    pub fn features(&self) -> &[f64] {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_what_went_in() {
        let row = DataRow::new(3, vec![0.5, 0.25]);
        assert_eq!(row.label(), 3);
        assert_eq!(row.features(), &[0.5, 0.25]);
    }
}
