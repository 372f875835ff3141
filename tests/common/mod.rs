#![allow(dead_code)]

use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::{Semaphore, mpsc};
use weekcast::{
    app::{
        events::SessionEvent,
        session::{ForecastSession, SessionOptions},
        window::Layout,
    },
    data::forecast::{ForecastProvider, ProviderError},
    domain::{
        calendar::{CalendarDate, Today},
        weather::{HourlyRecord, IconKey, Location},
    },
};

pub fn date(value: &str) -> CalendarDate {
    value.parse().expect("valid date fixture")
}

pub fn philly() -> Location {
    Location::new(40.0, -75.0, "Philadelphia")
}

pub fn berlin() -> Location {
    Location::new(52.52, 13.405, "Berlin")
}

pub fn hours(base_temp: f32) -> Vec<HourlyRecord> {
    (0..24u8)
        .map(|hour| HourlyRecord {
            temperature: base_temp + f32::from(hour),
            feels_like: base_temp + f32::from(hour) - 1.0,
            humidity: 45.0,
            uv_index: 3.0,
            wind_speed: 6.0,
            wind_gust: 11.0,
            precip_probability: 0.0,
            precip_amount: 0.0,
            conditions: "Clear".to_string(),
            icon: IconKey::ClearDay,
        })
        .collect()
}

/// Answers with a full day for every date in `from..=to`, nothing outside it.
/// Dates marked as failing return a provider error instead.
#[derive(Debug)]
pub struct HorizonProvider {
    from: CalendarDate,
    to: CalendarDate,
    failing: HashSet<CalendarDate>,
    calls: Mutex<Vec<(CalendarDate, f64)>>,
}

impl HorizonProvider {
    pub fn new(from: CalendarDate, to: CalendarDate) -> Self {
        Self {
            from,
            to,
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, date: CalendarDate) -> Self {
        self.failing.insert(date);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn calls_for(&self, date: CalendarDate) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|(called, _)| *called == date)
            .count()
    }

    fn answer(&self, location: &Location, date: CalendarDate) -> Result<Vec<HourlyRecord>, ProviderError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((date, location.latitude));
        if self.failing.contains(&date) {
            return Err(ProviderError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        if date < self.from || date > self.to {
            return Ok(Vec::new());
        }
        // Latitude as the base temperature tells locations apart in assertions.
        Ok(hours(location.latitude as f32))
    }
}

#[async_trait]
impl ForecastProvider for HorizonProvider {
    async fn fetch_day(
        &self,
        location: &Location,
        date: CalendarDate,
    ) -> Result<Vec<HourlyRecord>, ProviderError> {
        self.answer(location, date)
    }
}

/// Like [`HorizonProvider`], but fetches for `held` block until [`release`]
/// is called.
///
/// [`release`]: GatedProvider::release
#[derive(Debug)]
pub struct GatedProvider {
    inner: HorizonProvider,
    held: Location,
    gate: Semaphore,
}

impl GatedProvider {
    pub fn new(inner: HorizonProvider, held: Location) -> Self {
        Self {
            inner,
            held,
            gate: Semaphore::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }
}

#[async_trait]
impl ForecastProvider for GatedProvider {
    async fn fetch_day(
        &self,
        location: &Location,
        date: CalendarDate,
    ) -> Result<Vec<HourlyRecord>, ProviderError> {
        if location.same_place(&self.held) {
            let _permit = self.gate.acquire().await.expect("gate open");
        }
        self.inner.answer(location, date)
    }
}

pub fn session(provider: std::sync::Arc<dyn ForecastProvider>, layout: Layout) -> ForecastSession {
    ForecastSession::new(
        provider,
        SessionOptions {
            layout,
            today: Today::Fixed(date("2024-06-10")),
        },
    )
}

pub async fn settle(session: &mut ForecastSession, rx: &mut mpsc::Receiver<SessionEvent>) {
    while session.is_busy() {
        let event = rx.recv().await.expect("event channel open");
        session.handle_event(event);
    }
}
