use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    calendar::CalendarDate,
    daypart::UnitGroup,
    weather::{HourlyRecord, IconKey, Location},
};

pub const TIMELINE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("forecast request failed")]
    Transport(#[from] reqwest::Error),
    #[error("forecast request returned status {0}")]
    Status(StatusCode),
    #[error("failed to parse forecast payload")]
    Decode(#[from] serde_json::Error),
}

/// Source of hourly forecast data for a single calendar day.
///
/// `Ok` with an empty or short sequence means the provider answered but has
/// no usable day (typically past its forecast horizon). `Err` is reserved for
/// transport and status failures.
#[async_trait]
pub trait ForecastProvider: Send + Sync + std::fmt::Debug {
    async fn fetch_day(
        &self,
        location: &Location,
        date: CalendarDate,
    ) -> Result<Vec<HourlyRecord>, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct VisualCrossingClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: UnitGroup,
}

impl VisualCrossingClient {
    pub fn new(api_key: impl Into<String>, units: UnitGroup) -> Result<Self, ProviderError> {
        Self::with_base_url(TIMELINE_URL, api_key, units)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        units: UnitGroup,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            units,
        })
    }

    fn day_url(&self, location: &Location, date: CalendarDate) -> String {
        format!(
            "{}/{},{}/{}",
            self.base_url.trim_end_matches('/'),
            location.latitude,
            location.longitude,
            date
        )
    }
}

#[async_trait]
impl ForecastProvider for VisualCrossingClient {
    async fn fetch_day(
        &self,
        location: &Location,
        date: CalendarDate,
    ) -> Result<Vec<HourlyRecord>, ProviderError> {
        let response = self
            .client
            .get(self.day_url(location, date))
            .query(&[
                ("key", self.api_key.as_str()),
                ("include", "hours"),
                ("unitGroup", self.units.query_value()),
                ("contentType", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        let payload: TimelineResponse = serde_json::from_str(&body)?;
        Ok(parse_first_day(payload))
    }
}

fn parse_first_day(payload: TimelineResponse) -> Vec<HourlyRecord> {
    let Some(hours) = payload.days.into_iter().next().and_then(|day| day.hours) else {
        return Vec::new();
    };
    hours.into_iter().map(TimelineHour::into_record).collect()
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    days: Vec<TimelineDay>,
}

#[derive(Debug, Deserialize)]
struct TimelineDay {
    #[serde(default)]
    hours: Option<Vec<TimelineHour>>,
}

#[derive(Debug, Deserialize)]
struct TimelineHour {
    temp: Option<f32>,
    feelslike: Option<f32>,
    humidity: Option<f32>,
    uvindex: Option<f32>,
    windspeed: Option<f32>,
    windgust: Option<f32>,
    precipprob: Option<f32>,
    precip: Option<f32>,
    conditions: Option<String>,
    icon: Option<String>,
}

impl TimelineHour {
    fn into_record(self) -> HourlyRecord {
        HourlyRecord {
            temperature: self.temp.unwrap_or_default(),
            feels_like: self.feelslike.unwrap_or_default(),
            humidity: self.humidity.unwrap_or_default(),
            uv_index: self.uvindex.unwrap_or_default(),
            wind_speed: self.windspeed.unwrap_or_default(),
            wind_gust: self.windgust.unwrap_or_default(),
            precip_probability: self.precipprob.unwrap_or_default(),
            precip_amount: self.precip.unwrap_or_default(),
            conditions: self.conditions.unwrap_or_default(),
            icon: IconKey::from_key(self.icon.as_deref().unwrap_or_default()),
        }
    }
}
