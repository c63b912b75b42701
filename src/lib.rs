pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::MapsCoGeocoder;
pub use config::toml_config::TomlConfig;
pub use crate::core::{resolver::AddressResolver, session::SearchSession};
pub use domain::model::{Candidate, Coordinate, GeocodeResult, MapRegion, Pin, RequestState};
pub use utils::error::{GeoError, Result};
