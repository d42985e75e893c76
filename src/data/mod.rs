pub mod dataset;
pub mod labels;
pub mod loader;
pub mod rescale;
pub mod row;

pub use dataset::build_rows;
pub use loader::load_delimited;
pub use rescale::{rescale, FeatureRange};
pub use row::DataRow;
