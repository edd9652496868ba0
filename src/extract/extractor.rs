//! Fetches forecast documents from the Open-Meteo API, one request per configured
//! location.

use crate::config::{PipelineConfig, WeatherParams};
use crate::extract::error::ExtractError;
use crate::types::location::Location;
use crate::types::raw_weather::{ForecastResponse, RawWeather};
use log::{debug, error, info, warn};
use reqwest::Client;
use std::time::Duration;

/// Sequential HTTP extractor for the configured locations.
///
/// Requests are issued one at a time; after every successful request the extractor
/// pauses for the configured delay to stay within the provider's rate limits.
pub struct WeatherExtractor {
    client: Client,
    base_url: String,
    locations: Vec<Location>,
    params: WeatherParams,
    request_delay: Duration,
}

impl WeatherExtractor {
    /// Builds an extractor and its HTTP client from the pipeline configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ClientBuild`] if the TLS backend cannot be initialised.
    pub fn new(config: &PipelineConfig) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ExtractError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            locations: config.locations.clone(),
            params: config.params.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Requests the forecast for a single location.
    ///
    /// The returned [`RawWeather`] carries the configured name, country and
    /// coordinates alongside the decoded body, stamped with the time of extraction.
    pub async fn extract_location(&self, location: &Location) -> Result<RawWeather, ExtractError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&self.params.query_pairs(location))
            .build()
            .map_err(|e| ExtractError::NetworkRequest(self.base_url.clone(), e))?;
        let url = request.url().to_string();
        debug!("Requesting forecast for {} from {}", location.name, url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ExtractError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    ExtractError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ExtractError::NetworkRequest(url, e)
                });
            }
        };

        let body = response.text().await.map_err(|e| ExtractError::Body {
            url: url.clone(),
            source: e,
        })?;
        let forecast: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| ExtractError::Decode { url, source: e })?;

        Ok(RawWeather::new(location, forecast))
    }

    /// Extracts every configured location in order.
    ///
    /// A location that fails is logged and left out; the others are still
    /// requested. The result keeps the configured order minus the failures, and
    /// may be empty.
    pub async fn extract_all(&self) -> Vec<RawWeather> {
        let mut results = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            info!("Extracting weather data for {}", location.name);
            match self.extract_location(location).await {
                Ok(raw) => {
                    info!("Successfully extracted data for {}", location.name);
                    results.push(raw);
                    if !self.request_delay.is_zero() {
                        tokio::time::sleep(self.request_delay).await;
                    }
                }
                Err(e @ ExtractError::Decode { .. }) => {
                    error!("Unexpected response for {}: {}", location.name, e);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", location.name, e);
                }
            }
        }
        info!(
            "Extraction finished: {}/{} locations succeeded",
            results.len(),
            self.locations.len()
        );
        results
    }
}
