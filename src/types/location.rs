//! Geographic identity types: the configured [`Location`]s the pipeline visits, the
//! [`LocationInfo`] metadata attached to every table row, and the coordinate key used
//! to resolve rows to stored locations.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weather_etl::LatLon;
///
/// let london = LatLon(51.5074, -0.1278);
/// assert_eq!(london.0, 51.5074); // Latitude
/// assert_eq!(london.1, -0.1278); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Hashable identity of a location: its exact coordinate pair.
pub type CoordinateKey = (OrderedFloat<f64>, OrderedFloat<f64>);

impl LatLon {
    /// The key used to match stored locations. Two coordinates are the same
    /// location only if both components are bit-for-bit equal floats.
    pub fn key(&self) -> CoordinateKey {
        (OrderedFloat(self.0), OrderedFloat(self.1))
    }
}

/// A location the extractor requests weather for.
///
/// Deserializes from configuration; `lat`/`lon` are accepted as short aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, e.g. "New York".
    pub name: String,
    /// Country label, e.g. "USA".
    pub country: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

/// Location metadata carried by every row of every transformed table.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInfo {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl LocationInfo {
    pub fn coordinates(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_distinguishes_coordinates_not_names() {
        let a = Location::new("Springfield", "USA", 39.7817, -89.6501);
        let b = Location::new("Springfield", "USA", 42.1015, -72.5898);
        assert_ne!(a.coordinates().key(), b.coordinates().key());

        let c = Location::new("Other name", "USA", 39.7817, -89.6501);
        assert_eq!(a.coordinates().key(), c.coordinates().key());
    }

    #[test]
    fn test_location_accepts_short_aliases() -> Result<(), serde_yaml::Error> {
        let location: Location =
            serde_yaml::from_str("name: Tokyo\ncountry: Japan\nlat: 35.6762\nlon: 139.6503\n")?;
        assert_eq!(location.coordinates(), LatLon(35.6762, 139.6503));
        Ok(())
    }
}
