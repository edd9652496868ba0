//! Defines the `WeatherCode` enum, mapping Open-Meteo's WMO weather interpretation codes
//! to descriptive variants and human-readable labels.

/// Label used for any code that is missing or not part of the WMO table.
pub const UNKNOWN_WEATHER: &str = "Unknown";

/// Represents the WMO weather interpretation code reported by Open-Meteo.
///
/// Open-Meteo reports this code in the `weather_code` field of the current, hourly
/// and daily blocks. See the
/// [Open-Meteo documentation](https://open-meteo.com/en/docs#weathervariables)
/// for the official code definitions.
///
/// Convert an integer code into this enum with [`WeatherCode::from_i64`], or go
/// straight to a label with [`describe`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum WeatherCode {
    /// Code 0: Clear sky.
    ClearSky = 0,
    /// Code 1: Mainly clear.
    MainlyClear = 1,
    /// Code 2: Partly cloudy.
    PartlyCloudy = 2,
    /// Code 3: Overcast.
    Overcast = 3,
    /// Code 45: Fog.
    Fog = 45,
    /// Code 48: Depositing rime fog.
    RimeFog = 48,
    /// Code 51: Light drizzle.
    LightDrizzle = 51,
    /// Code 53: Moderate drizzle.
    Drizzle = 53,
    /// Code 55: Dense drizzle.
    DenseDrizzle = 55,
    /// Code 61: Slight rain.
    SlightRain = 61,
    /// Code 63: Moderate rain.
    Rain = 63,
    /// Code 65: Heavy rain.
    HeavyRain = 65,
    /// Code 71: Slight snow fall.
    SlightSnowfall = 71,
    /// Code 73: Moderate snow fall.
    Snowfall = 73,
    /// Code 75: Heavy snow fall.
    HeavySnowfall = 75,
    /// Code 77: Snow grains.
    SnowGrains = 77,
    /// Code 80: Slight rain showers.
    SlightRainShowers = 80,
    /// Code 81: Moderate rain showers.
    RainShowers = 81,
    /// Code 82: Violent rain showers.
    ViolentRainShowers = 82,
    /// Code 85: Slight snow showers.
    SlightSnowShowers = 85,
    /// Code 86: Heavy snow showers.
    HeavySnowShowers = 86,
    /// Code 95: Thunderstorm.
    Thunderstorm = 95,
    /// Code 96: Thunderstorm with slight hail.
    ThunderstormSlightHail = 96,
    /// Code 99: Thunderstorm with heavy hail.
    ThunderstormHeavyHail = 99,
}

impl WeatherCode {
    /// Every code in the table, in ascending order.
    pub const ALL: [WeatherCode; 24] = [
        WeatherCode::ClearSky,
        WeatherCode::MainlyClear,
        WeatherCode::PartlyCloudy,
        WeatherCode::Overcast,
        WeatherCode::Fog,
        WeatherCode::RimeFog,
        WeatherCode::LightDrizzle,
        WeatherCode::Drizzle,
        WeatherCode::DenseDrizzle,
        WeatherCode::SlightRain,
        WeatherCode::Rain,
        WeatherCode::HeavyRain,
        WeatherCode::SlightSnowfall,
        WeatherCode::Snowfall,
        WeatherCode::HeavySnowfall,
        WeatherCode::SnowGrains,
        WeatherCode::SlightRainShowers,
        WeatherCode::RainShowers,
        WeatherCode::ViolentRainShowers,
        WeatherCode::SlightSnowShowers,
        WeatherCode::HeavySnowShowers,
        WeatherCode::Thunderstorm,
        WeatherCode::ThunderstormSlightHail,
        WeatherCode::ThunderstormHeavyHail,
    ];

    /// Attempts to convert a WMO weather code into a `WeatherCode` variant.
    ///
    /// # Returns
    ///
    /// * `Some(WeatherCode)` if `value` is one of the codes Open-Meteo documents.
    /// * `None` for anything else (e.g. 4, 100 or negative values).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weather_etl::WeatherCode;
    ///
    /// assert_eq!(WeatherCode::from_i64(3), Some(WeatherCode::Overcast));
    /// assert_eq!(WeatherCode::from_i64(4), None);
    /// ```
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(WeatherCode::ClearSky),
            1 => Some(WeatherCode::MainlyClear),
            2 => Some(WeatherCode::PartlyCloudy),
            3 => Some(WeatherCode::Overcast),
            45 => Some(WeatherCode::Fog),
            48 => Some(WeatherCode::RimeFog),
            51 => Some(WeatherCode::LightDrizzle),
            53 => Some(WeatherCode::Drizzle),
            55 => Some(WeatherCode::DenseDrizzle),
            61 => Some(WeatherCode::SlightRain),
            63 => Some(WeatherCode::Rain),
            65 => Some(WeatherCode::HeavyRain),
            71 => Some(WeatherCode::SlightSnowfall),
            73 => Some(WeatherCode::Snowfall),
            75 => Some(WeatherCode::HeavySnowfall),
            77 => Some(WeatherCode::SnowGrains),
            80 => Some(WeatherCode::SlightRainShowers),
            81 => Some(WeatherCode::RainShowers),
            82 => Some(WeatherCode::ViolentRainShowers),
            85 => Some(WeatherCode::SlightSnowShowers),
            86 => Some(WeatherCode::HeavySnowShowers),
            95 => Some(WeatherCode::Thunderstorm),
            96 => Some(WeatherCode::ThunderstormSlightHail),
            99 => Some(WeatherCode::ThunderstormHeavyHail),
            _ => None,
        }
    }

    /// The numeric WMO code.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// The human-readable label stored in the `weather_description` columns.
    pub fn description(self) -> &'static str {
        match self {
            WeatherCode::ClearSky => "Clear sky",
            WeatherCode::MainlyClear => "Mainly clear",
            WeatherCode::PartlyCloudy => "Partly cloudy",
            WeatherCode::Overcast => "Overcast",
            WeatherCode::Fog => "Fog",
            WeatherCode::RimeFog => "Depositing rime fog",
            WeatherCode::LightDrizzle => "Light drizzle",
            WeatherCode::Drizzle => "Moderate drizzle",
            WeatherCode::DenseDrizzle => "Dense drizzle",
            WeatherCode::SlightRain => "Slight rain",
            WeatherCode::Rain => "Moderate rain",
            WeatherCode::HeavyRain => "Heavy rain",
            WeatherCode::SlightSnowfall => "Slight snow fall",
            WeatherCode::Snowfall => "Moderate snow fall",
            WeatherCode::HeavySnowfall => "Heavy snow fall",
            WeatherCode::SnowGrains => "Snow grains",
            WeatherCode::SlightRainShowers => "Slight rain showers",
            WeatherCode::RainShowers => "Moderate rain showers",
            WeatherCode::ViolentRainShowers => "Violent rain showers",
            WeatherCode::SlightSnowShowers => "Slight snow showers",
            WeatherCode::HeavySnowShowers => "Heavy snow showers",
            WeatherCode::Thunderstorm => "Thunderstorm",
            WeatherCode::ThunderstormSlightHail => "Thunderstorm with slight hail",
            WeatherCode::ThunderstormHeavyHail => "Thunderstorm with heavy hail",
        }
    }
}

/// Maps a WMO code to its label, falling back to [`UNKNOWN_WEATHER`].
///
/// ```rust
/// use weather_etl::describe;
///
/// assert_eq!(describe(95), "Thunderstorm");
/// assert_eq!(describe(42), "Unknown");
/// ```
pub fn describe(code: i64) -> &'static str {
    WeatherCode::from_i64(code)
        .map(WeatherCode::description)
        .unwrap_or(UNKNOWN_WEATHER)
}

/// Like [`describe`], but a missing code is also `"Unknown"`.
pub fn describe_opt(code: Option<i64>) -> &'static str {
    code.map(describe).unwrap_or(UNKNOWN_WEATHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_labels() {
        let expected = [
            (0, "Clear sky"),
            (1, "Mainly clear"),
            (2, "Partly cloudy"),
            (3, "Overcast"),
            (45, "Fog"),
            (48, "Depositing rime fog"),
            (51, "Light drizzle"),
            (53, "Moderate drizzle"),
            (55, "Dense drizzle"),
            (61, "Slight rain"),
            (63, "Moderate rain"),
            (65, "Heavy rain"),
            (71, "Slight snow fall"),
            (73, "Moderate snow fall"),
            (75, "Heavy snow fall"),
            (77, "Snow grains"),
            (80, "Slight rain showers"),
            (81, "Moderate rain showers"),
            (82, "Violent rain showers"),
            (85, "Slight snow showers"),
            (86, "Heavy snow showers"),
            (95, "Thunderstorm"),
            (96, "Thunderstorm with slight hail"),
            (99, "Thunderstorm with heavy hail"),
        ];
        assert_eq!(expected.len(), WeatherCode::ALL.len());
        for (code, label) in expected {
            assert_eq!(describe(code), label, "label for code {}", code);
        }
    }

    #[test]
    fn test_codes_outside_table_are_unknown() {
        let known: Vec<i64> = WeatherCode::ALL.iter().map(|c| c.code()).collect();
        for code in -5..=120 {
            if !known.contains(&code) {
                assert_eq!(describe(code), UNKNOWN_WEATHER, "code {}", code);
            }
        }
        assert_eq!(describe(i64::MAX), UNKNOWN_WEATHER);
        assert_eq!(describe_opt(None), UNKNOWN_WEATHER);
    }

    #[test]
    fn test_round_trip_through_enum() {
        for code in WeatherCode::ALL {
            assert_eq!(WeatherCode::from_i64(code.code()), Some(code));
        }
    }
}
