pub mod resolver;
pub mod session;

pub use crate::domain::model::{Coordinate, GeocodeResult, Pin, RequestState};
pub use crate::domain::ports::{ConfigProvider, GeocodingProvider};
pub use crate::utils::error::Result;
