pub mod catalog;
pub mod color;
pub mod config;
pub mod conflicts;
pub mod ips;
pub mod matcher;
pub mod parser;
pub mod slots;

use anyhow::Result;
use std::path::Path;

/// Load a raw section dataset and build the catalog with the configured palette
pub fn load_catalog(path: &Path, config: &Config) -> Result<catalog::Catalog> {
    let rows = catalog::load_sections_from_path(path)?;
    let builder = config.catalog_builder()?;
    Ok(builder.build(&rows))
}

pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// Re-export commonly used types
pub use catalog::{build_catalog, Catalog, CatalogEntry, CatalogStore, RawSection, Section};
pub use color::Palette;
pub use config::Config;
pub use conflicts::{find_conflicts, fits_schedule};
pub use matcher::{match_catalog, CatalogMatcher};
pub use parser::{parse_time_string, Day, Meeting, ParsedTime};
pub use slots::{build_slots, merge_slots, MergedSlot, Slot};
