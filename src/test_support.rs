use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    data::forecast::{ForecastProvider, ProviderError},
    domain::{
        calendar::CalendarDate,
        weather::{HourlyRecord, IconKey, Location},
    },
};

pub(crate) fn date(value: &str) -> CalendarDate {
    value.parse().expect("valid date fixture")
}

pub(crate) fn philly() -> Location {
    Location::new(40.0, -75.0, "Philadelphia")
}

/// 24 hours warming by one degree per hour from `base_temp`.
pub(crate) fn sample_hours(base_temp: f32) -> Vec<HourlyRecord> {
    (0..24u8)
        .map(|hour| {
            let hour = f32::from(hour);
            HourlyRecord {
                temperature: base_temp + hour,
                feels_like: base_temp + hour - 1.0,
                humidity: 40.0 + hour,
                uv_index: (hour / 4.0).floor(),
                wind_speed: 5.0,
                wind_gust: 9.0,
                precip_probability: 0.0,
                precip_amount: 0.0,
                conditions: "Clear".to_string(),
                icon: IconKey::ClearDay,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Script {
    Day(f32),
    Hours(usize),
    Fail,
}

/// Provider answering from a per-date script. Unscripted dates have no data.
#[derive(Debug, Default)]
pub(crate) struct ScriptedProvider {
    scripts: HashMap<CalendarDate, Script>,
    calls: Mutex<Vec<CalendarDate>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_day(mut self, date: CalendarDate, base_temp: f32) -> Self {
        self.scripts.insert(date, Script::Day(base_temp));
        self
    }

    pub(crate) fn with_hours(mut self, date: CalendarDate, count: usize) -> Self {
        self.scripts.insert(date, Script::Hours(count));
        self
    }

    pub(crate) fn with_failure(mut self, date: CalendarDate) -> Self {
        self.scripts.insert(date, Script::Fail);
        self
    }

    /// Scripts a full day for every date in `from..=to`.
    pub(crate) fn with_days_through(mut self, from: CalendarDate, to: CalendarDate) -> Self {
        let mut current = from;
        while current <= to {
            self.scripts.insert(current, Script::Day(60.0));
            current = current.add_days(1);
        }
        self
    }

    pub(crate) fn calls_for(&self, date: CalendarDate) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|called| **called == date)
            .count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl ForecastProvider for ScriptedProvider {
    async fn fetch_day(
        &self,
        _location: &Location,
        date: CalendarDate,
    ) -> Result<Vec<HourlyRecord>, ProviderError> {
        self.calls.lock().expect("calls lock").push(date);
        match self.scripts.get(&date).copied() {
            Some(Script::Day(base_temp)) => Ok(sample_hours(base_temp)),
            Some(Script::Hours(count)) => {
                Ok(sample_hours(50.0).into_iter().cycle().take(count).collect())
            }
            Some(Script::Fail) => Err(ProviderError::Status(StatusCode::SERVICE_UNAVAILABLE)),
            None => Ok(Vec::new()),
        }
    }
}
