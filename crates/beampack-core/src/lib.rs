pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{BeamCatalog, load_catalog, parse_catalog, parse_catalog_bytes};
pub use config::{BeampackConfig, PackingConfig, Strategy};
pub use error::{PackError, PackResult};
pub use types::*;
