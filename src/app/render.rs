use crate::config::OutputFormat;
use crate::domain::model::{GeocodeResult, Pin, DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy)]
pub struct DisplaySettings {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub output: OutputFormat,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
            output: OutputFormat::Text,
        }
    }
}

impl DisplaySettings {
    pub fn pin(&self, result: &GeocodeResult) -> Pin {
        Pin::new(result, self.latitude_delta, self.longitude_delta)
    }
}

pub fn render_pin(pin: &Pin, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(pin)?),
        OutputFormat::Text => {
            let (south, west, north, east) = pin.bounding_box();
            let title = if pin.title.is_empty() {
                "(unnamed)"
            } else {
                pin.title.as_str()
            };
            Ok(format!(
                "📍 {}\n   latitude:  {}\n   longitude: {}\n   region:    [{:.5}, {:.5}] - [{:.5}, {:.5}]\n   map:       {}",
                title,
                pin.coordinate.latitude,
                pin.coordinate.longitude,
                south,
                west,
                north,
                east,
                pin.osm_url()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Coordinate;

    fn paris() -> GeocodeResult {
        GeocodeResult {
            coordinate: Coordinate::new(48.85, 2.35),
            label: "Paris".to_string(),
        }
    }

    #[test]
    fn test_render_text() {
        let settings = DisplaySettings::default();
        let text = render_pin(&settings.pin(&paris()), OutputFormat::Text).unwrap();

        assert!(text.contains("Paris"));
        assert!(text.contains("latitude:  48.85"));
        assert!(text.contains("longitude: 2.35"));
        assert!(text.contains("openstreetmap.org"));
    }

    #[test]
    fn test_render_json() {
        let settings = DisplaySettings {
            latitude_delta: 0.1,
            longitude_delta: 0.2,
            output: OutputFormat::Json,
        };
        let json = render_pin(&settings.pin(&paris()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Paris");
        assert_eq!(value["coordinate"]["latitude"], 48.85);
        assert_eq!(value["region"]["latitude_delta"], 0.1);
        assert_eq!(value["region"]["longitude_delta"], 0.2);
    }
}
