use serde::{Deserialize, Serialize};

use crate::utils::error::{GeoError, Result};

/// Default map span used by the pin view, in degrees.
pub const DEFAULT_LATITUDE_DELTA: f64 = 0.0322;
pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.0221;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Providers send coordinates either as numeric strings or as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    pub fn to_f64(&self, field: &str) -> Result<f64> {
        match self {
            NumericField::Number(n) => Ok(*n),
            NumericField::Text(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| GeoError::ProcessingError {
                        message: format!("candidate field '{}' is not numeric: {:?}", field, s),
                    })
            }
        }
    }
}

/// One match record returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub lat: NumericField,
    pub lon: NumericField,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Candidate {
    pub fn coordinate(&self) -> Result<Coordinate> {
        Ok(Coordinate::new(
            self.lat.to_f64("lat")?,
            self.lon.to_f64("lon")?,
        ))
    }

    pub fn into_result(self) -> Result<GeocodeResult> {
        let coordinate = self.coordinate()?;
        Ok(GeocodeResult {
            coordinate,
            label: self.name.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub coordinate: Coordinate,
    pub label: String,
}

/// UI-facing state of one search box.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(GeocodeResult),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&GeocodeResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn around(coordinate: Coordinate) -> Self {
        Self::with_deltas(coordinate, DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA)
    }

    pub fn with_deltas(coordinate: Coordinate, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            latitude_delta,
            longitude_delta,
        }
    }

    /// (south, west, north, east)
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let half_lat = self.latitude_delta / 2.0;
        let half_lon = self.longitude_delta / 2.0;
        (
            self.latitude - half_lat,
            self.longitude - half_lon,
            self.latitude + half_lat,
            self.longitude + half_lon,
        )
    }
}

/// A resolved address as it is placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub coordinate: Coordinate,
    pub title: String,
    pub region: MapRegion,
}

impl Pin {
    pub fn new(result: &GeocodeResult, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            coordinate: result.coordinate,
            title: result.label.clone(),
            region: MapRegion::with_deltas(result.coordinate, latitude_delta, longitude_delta),
        }
    }

    pub fn osm_url(&self) -> String {
        let Coordinate {
            latitude,
            longitude,
        } = self.coordinate;
        format!(
            "https://www.openstreetmap.org/?mlat={}&mlon={}#map=15/{}/{}",
            latitude, longitude, latitude, longitude
        )
    }

    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        self.region.bounding_box()
    }
}

impl From<&GeocodeResult> for Pin {
    fn from(result: &GeocodeResult) -> Self {
        Pin::new(result, DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA)
    }
}
