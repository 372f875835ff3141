use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    data::forecast::ForecastProvider,
    domain::{
        calendar::CalendarDate,
        weather::{DayError, DayForecast, Location},
    },
};

/// What `ensure` hands back: the day, or nothing usable for it.
#[derive(Debug, Clone, PartialEq)]
pub enum DaySlot {
    Empty,
    Present(DayForecast),
}

impl DaySlot {
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn day(&self) -> Option<&DayForecast> {
        match self {
            Self::Present(day) => Some(day),
            Self::Empty => None,
        }
    }
}

/// Read-only view of one cache key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Absent,
    Empty,
    Present(&'a DayForecast),
}

impl<'a> Lookup<'a> {
    pub fn day(self) -> Option<&'a DayForecast> {
        match self {
            Self::Present(day) => Some(day),
            Self::Absent | Self::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ensured {
    pub slot: DaySlot,
    /// The provider failed; nothing was stored and a later `ensure` will retry.
    pub load_failed: bool,
}

/// Per-location memo of hourly forecasts keyed by calendar date.
///
/// Entries are never evicted or invalidated; the whole cache is dropped when
/// the location changes. `ensure` takes `&mut self` across the provider call,
/// so a cache can only ever have one fetch outstanding.
#[derive(Debug, Clone, Default)]
pub struct DateCache {
    entries: HashMap<CalendarDate, DaySlot>,
}

impl DateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: CalendarDate) -> Lookup<'_> {
        match self.entries.get(&date) {
            None => Lookup::Absent,
            Some(DaySlot::Empty) => Lookup::Empty,
            Some(DaySlot::Present(day)) => Lookup::Present(day),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(date = %date))]
    pub async fn ensure(
        &mut self,
        provider: &dyn ForecastProvider,
        location: &Location,
        date: CalendarDate,
    ) -> Ensured {
        if let Some(slot) = self.entries.get(&date) {
            debug!("cache hit");
            return Ensured {
                slot: slot.clone(),
                load_failed: false,
            };
        }

        debug!("cache miss, fetching");
        let hours = match provider.fetch_day(location, date).await {
            Ok(hours) => hours,
            Err(err) => {
                warn!(error = %err, "forecast fetch failed; entry left absent");
                return Ensured {
                    slot: DaySlot::Empty,
                    load_failed: true,
                };
            }
        };

        let slot = match DayForecast::from_hours(hours) {
            Ok(day) => DaySlot::Present(day),
            Err(DayError::NoData) => {
                debug!("provider has no data for this date");
                DaySlot::Empty
            }
            Err(reason @ DayError::Malformed { .. }) => {
                warn!(%reason, "malformed day stored as empty");
                DaySlot::Empty
            }
        };
        self.entries.insert(date, slot.clone());
        Ensured {
            slot,
            load_failed: false,
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached dates in calendar order.
    pub fn dates(&self) -> Vec<CalendarDate> {
        let mut dates: Vec<_> = self.entries.keys().copied().collect();
        dates.sort_unstable();
        dates
    }
}
