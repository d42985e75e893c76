use std::fs::File;
use std::io::{BufRead, BufReader};

use log::error;

/// Reads a delimited text file into rows of string fields.
///
/// Each line becomes one row, split on the single-character `delimiter`; the
/// field after the last delimiter is kept even without a trailing delimiter.
/// There is no quoting or escaping. Open failures, read failures, and empty
/// files are logged and yield an empty result, leaving the caller's menu loop
/// to decide whether to retry.
pub fn load_delimited(path: &str, delimiter: char) -> Vec<Vec<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!("could not open {}: {}", path, e);
            return Vec::new();
        }
    };

    let mut rows = Vec::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => rows.push(line.split(delimiter).map(str::to_owned).collect()),
            Err(e) => {
                error!("read failed in {}: {}", path, e);
                return Vec::new();
            }
        }
    }

    if rows.is_empty() {
        error!("{} contained no data", path);
    }
    rows
}
