//! Reshapes raw forecast documents into the three flat tables the loader stores.
//!
//! Every function here is pure: the same [`RawWeather`] always yields the same frames.
//! Numbers the provider left out (or reported as `NaN`/infinite) become `0.0`, and a
//! missing weather code becomes `0` labelled `"Unknown"`.

use crate::transform::error::TransformError;
use crate::types::fragment::FragmentKind;
use crate::types::frames::current_frame::CurrentFrame;
use crate::types::frames::daily_frame::DailyFrame;
use crate::types::frames::hourly_frame::HourlyFrame;
use crate::types::frames::WeatherFrame;
use crate::types::raw_weather::RawWeather;
use crate::types::weather_code::describe_opt;
use crate::types::weather_data::current::CurrentObservation;
use crate::types::weather_data::daily::DailyForecastPoint;
use crate::types::weather_data::hourly::HourlyForecastPoint;
use log::info;
use polars::error::PolarsError;

fn number(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn code(value: Option<i64>) -> (i64, String) {
    (value.unwrap_or(0), describe_opt(value).to_string())
}

/// Element `idx` of a series that may be shorter than its `time` axis.
fn at<T: Clone>(series: &[Option<T>], idx: usize) -> Option<T> {
    series.get(idx).cloned().flatten()
}

fn build_error(
    kind: FragmentKind,
    raw: &RawWeather,
) -> impl FnOnce(PolarsError) -> TransformError + '_ {
    move |source| TransformError::FrameBuild {
        kind,
        city: raw.city_name.clone(),
        source,
    }
}

/// One row with the location's current conditions, or an empty frame when the
/// response has no `current` block.
pub fn transform_current(raw: &RawWeather) -> Result<CurrentFrame, TransformError> {
    let Some(current) = raw.response.current.as_ref() else {
        return Ok(CurrentFrame::empty());
    };
    let (weather_code, weather_description) = code(current.weather_code);
    let row = CurrentObservation {
        location: raw.location_info(),
        temperature: number(current.temperature_2m),
        feels_like: number(current.apparent_temperature),
        humidity: number(current.relative_humidity_2m),
        pressure: number(current.pressure_msl),
        wind_speed: number(current.wind_speed_10m),
        wind_direction: number(current.wind_direction_10m),
        weather_code,
        weather_description,
        uv_index: number(current.uv_index),
        visibility: number(current.visibility),
        recorded_at: current.time.clone().unwrap_or_default(),
        extraction_time: raw.extraction_time.to_rfc3339(),
    };
    CurrentFrame::from_observations(&[row]).map_err(build_error(FragmentKind::Current, raw))
}

/// One row per forecast hour. A missing `hourly` block or an empty time axis
/// yields an empty frame.
pub fn transform_hourly(raw: &RawWeather) -> Result<HourlyFrame, TransformError> {
    let Some(hourly) = raw.response.hourly.as_ref().filter(|h| !h.time.is_empty()) else {
        return Ok(HourlyFrame::empty());
    };
    let location = raw.location_info();
    let rows: Vec<HourlyForecastPoint> = hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let (weather_code, weather_description) = code(at(&hourly.weather_code, i));
            HourlyForecastPoint {
                location: location.clone(),
                forecast_time: time.clone(),
                temperature: number(at(&hourly.temperature_2m, i)),
                feels_like: number(at(&hourly.apparent_temperature, i)),
                humidity: number(at(&hourly.relative_humidity_2m, i)),
                precipitation_probability: number(at(&hourly.precipitation_probability, i)),
                precipitation: number(at(&hourly.precipitation, i)),
                weather_code,
                weather_description,
                wind_speed: number(at(&hourly.wind_speed_10m, i)),
                wind_direction: number(at(&hourly.wind_direction_10m, i)),
            }
        })
        .collect();
    HourlyFrame::from_points(&rows).map_err(build_error(FragmentKind::Hourly, raw))
}

/// One row per forecast day. Same emptiness rules as [`transform_hourly`];
/// sunrise and sunset are kept exactly as the provider sent them.
pub fn transform_daily(raw: &RawWeather) -> Result<DailyFrame, TransformError> {
    let Some(daily) = raw.response.daily.as_ref().filter(|d| !d.time.is_empty()) else {
        return Ok(DailyFrame::empty());
    };
    let location = raw.location_info();
    let rows: Vec<DailyForecastPoint> = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let (weather_code, weather_description) = code(at(&daily.weather_code, i));
            DailyForecastPoint {
                location: location.clone(),
                forecast_date: date.clone(),
                weather_code,
                weather_description,
                temperature_max: number(at(&daily.temperature_2m_max, i)),
                temperature_min: number(at(&daily.temperature_2m_min, i)),
                sunrise: at(&daily.sunrise, i).unwrap_or_default(),
                sunset: at(&daily.sunset, i).unwrap_or_default(),
                precipitation_sum: number(at(&daily.precipitation_sum, i)),
                precipitation_probability_max: number(at(&daily.precipitation_probability_max, i)),
                wind_speed_max: number(at(&daily.wind_speed_10m_max, i)),
            }
        })
        .collect();
    DailyFrame::from_points(&rows).map_err(build_error(FragmentKind::Daily, raw))
}

/// The three tables produced from one extraction run.
#[derive(Debug, Clone)]
pub struct TransformedTables {
    pub current: CurrentFrame,
    pub hourly: HourlyFrame,
    pub daily: DailyFrame,
}

impl TransformedTables {
    pub fn empty() -> Self {
        Self {
            current: CurrentFrame::empty(),
            hourly: HourlyFrame::empty(),
            daily: DailyFrame::empty(),
        }
    }

    /// Row counts as `(current, hourly, daily)`.
    pub fn record_counts(&self) -> (usize, usize, usize) {
        (
            self.current.height(),
            self.hourly.height(),
            self.daily.height(),
        )
    }
}

/// Stacks the non-empty fragments of one kind in order. No fragments gives a
/// zero-row table that still has the kind's schema.
fn concat<F: WeatherFrame>(fragments: Vec<F>) -> Result<F, TransformError> {
    let mut iter = fragments.into_iter().filter(|f| !f.is_empty());
    let Some(first) = iter.next() else {
        return Ok(F::empty());
    };
    let mut frame = first.frame().clone();
    for fragment in iter {
        frame
            .vstack_mut(fragment.frame())
            .map_err(|source| TransformError::Concat {
                kind: F::KIND,
                source,
            })?;
    }
    Ok(F::from_frame(frame))
}

/// Applies the three per-location transforms to a whole extraction run.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeatherTransformer;

impl WeatherTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Transforms every result, preserving visit order within each table.
    pub fn transform_all(
        &self,
        raw_data: &[RawWeather],
    ) -> Result<TransformedTables, TransformError> {
        let mut current = Vec::with_capacity(raw_data.len());
        let mut hourly = Vec::with_capacity(raw_data.len());
        let mut daily = Vec::with_capacity(raw_data.len());

        for raw in raw_data {
            info!("Transforming data for {}", raw.city_name);
            current.push(transform_current(raw)?);
            hourly.push(transform_hourly(raw)?);
            daily.push(transform_daily(raw)?);
        }

        let tables = TransformedTables {
            current: concat(current)?,
            hourly: concat(hourly)?,
            daily: concat(daily)?,
        };
        let (c, h, d) = tables.record_counts();
        info!(
            "Transformed {} current records, {} hourly records, {} daily records",
            c, h, d
        );
        Ok(tables)
    }
}
