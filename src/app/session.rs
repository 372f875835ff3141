use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc, Weekday};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app::{
        cache::{DateCache, Lookup},
        events::{SessionEvent, start_initialize_task, start_reanchor_task, start_shift_task},
        window::{Layout, ShiftOutcome, Window, WindowController},
    },
    data::forecast::ForecastProvider,
    domain::{
        calendar::{CalendarDate, Today, day_jump_to},
        weather::Location,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub layout: Layout,
    pub today: Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardStatus {
    /// No location has been supplied yet.
    Unconfigured,
    Loading,
    ConnectionError,
    Ready,
}

impl fmt::Display for DashboardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Unconfigured => "Waiting for a location...",
            Self::Loading => "Loading forecast...",
            Self::ConnectionError => "Connection Error: Try Again",
            Self::Ready => "Ready",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadStatus {
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
}

impl LoadStatus {
    pub fn mark_success(&mut self) {
        self.last_success = Some(Utc::now());
        self.consecutive_failures = 0;
    }

    pub fn mark_failure(&mut self) {
        self.last_failure = Some(Utc::now());
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    pub fn record(&mut self, load_failed: bool) {
        if load_failed {
            self.mark_failure();
        } else {
            self.mark_success();
        }
    }

    pub fn has_error(&self) -> bool {
        self.consecutive_failures > 0
    }
}

/// One day panel the UI should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel<'a> {
    pub date: CalendarDate,
    pub day: Lookup<'a>,
}

/// The active location, its date cache and the visible window.
///
/// Fetch sequences run on spawned tasks and report back through
/// [`SessionEvent`]s; every result carries the generation it was started
/// under and is dropped if a newer location has been adopted since.
#[derive(Debug)]
pub struct ForecastSession {
    provider: Arc<dyn ForecastProvider>,
    today: Today,
    location: Option<Location>,
    cache: DateCache,
    controller: WindowController,
    generation: u64,
    loading: bool,
    load_status: LoadStatus,
    day_jump: i64,
}

impl ForecastSession {
    pub fn new(provider: Arc<dyn ForecastProvider>, options: SessionOptions) -> Self {
        Self {
            provider,
            today: options.today,
            location: None,
            cache: DateCache::new(),
            controller: WindowController::new(options.layout),
            generation: 0,
            loading: false,
            load_status: LoadStatus::default(),
            day_jump: 0,
        }
    }

    /// Adopts `location`: drops the cache and window, then starts fetching the
    /// neighbourhood around today plus the pending day jump. Returns the new
    /// generation.
    pub fn set_location(&mut self, location: Location, tx: &mpsc::Sender<SessionEvent>) -> u64 {
        self.generation += 1;
        self.cache.reset();
        self.controller.clear();
        self.loading = true;

        let anchor = self.anchor();
        info!(
            generation = self.generation,
            location = %location.display_name(),
            %anchor,
            "adopting location"
        );
        self.location = Some(location.clone());
        start_initialize_task(
            tx.clone(),
            Arc::clone(&self.provider),
            location,
            anchor,
            self.generation,
        );
        self.generation
    }

    /// Pages both dates a week forward or back. Returns `false` when the shift
    /// was dropped because nothing is loaded yet or navigation is in flight.
    pub fn shift(&mut self, forward: bool, tx: &mpsc::Sender<SessionEvent>) -> bool {
        if self.loading {
            return false;
        }
        let Some(location) = self.location.clone() else {
            return false;
        };
        let Some(plan) = self.controller.begin_shift(forward) else {
            debug!(forward, "shift dropped; navigation busy or no window");
            return false;
        };
        start_shift_task(
            tx.clone(),
            Arc::clone(&self.provider),
            location,
            self.cache.clone(),
            plan,
            self.controller.layout(),
            self.generation,
        );
        true
    }

    /// Moves the window onto `today + day_jump`; later Initializes anchor there
    /// too. Without a location the jump is only recorded. While a load or
    /// another navigation is in flight the call is dropped and the jump is left
    /// unchanged. Returns whether a move was started.
    pub fn set_day_jump(&mut self, day_jump: i64, tx: &mpsc::Sender<SessionEvent>) -> bool {
        let Some(location) = self.location.clone() else {
            self.day_jump = day_jump;
            return false;
        };
        if self.loading || self.controller.begin_navigation().is_none() {
            debug!(day_jump, "day jump dropped; session busy");
            return false;
        }
        self.day_jump = day_jump;
        start_reanchor_task(
            tx.clone(),
            Arc::clone(&self.provider),
            location,
            self.cache.clone(),
            self.anchor(),
            self.generation,
        );
        true
    }

    /// Jumps to the next occurrence of `weekday`, today included.
    pub fn select_weekday(&mut self, weekday: Weekday, tx: &mpsc::Sender<SessionEvent>) -> bool {
        let jump = day_jump_to(self.today.resolve().weekday(), weekday);
        self.set_day_jump(jump, tx)
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.controller.set_layout(layout);
    }

    pub fn set_viewport_width(&mut self, width_px: u32) {
        self.set_layout(Layout::from_width(width_px));
    }

    /// Publishes a finished fetch sequence. Returns `false` when the result
    /// belonged to a superseded generation and was discarded.
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        let generation = event.generation();
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding superseded result"
            );
            return false;
        }

        match event {
            SessionEvent::Initialized {
                cache,
                neighborhood,
                ..
            } => {
                self.cache = cache;
                self.controller.publish(neighborhood.window);
                self.loading = false;
                self.record_load(neighborhood.load_failed);
                info!(generation, cached = self.cache.len(), "window published");
            }
            SessionEvent::Shifted {
                cache, resolution, ..
            } => {
                self.cache = cache;
                self.controller.finish_shift(resolution.outcome);
                self.record_load(resolution.load_failed);
            }
            SessionEvent::Reanchored {
                cache, reanchor, ..
            } => {
                self.cache = cache;
                self.controller.finish_reanchor(reanchor.window);
                self.record_load(reanchor.load_failed);
            }
        }
        true
    }

    fn record_load(&mut self, load_failed: bool) {
        if load_failed {
            warn!(
                failures = self.load_status.consecutive_failures + 1,
                "forecast provider unavailable"
            );
        }
        self.load_status.record(load_failed);
    }

    fn anchor(&self) -> CalendarDate {
        self.today.resolve().add_days(self.day_jump)
    }

    pub fn current_window(&self) -> Option<Window> {
        self.controller.window()
    }

    pub fn current_cache(&self) -> &DateCache {
        &self.cache
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_load_error(&self) -> bool {
        self.load_status.has_error()
    }

    /// A fetch sequence is outstanding whose result has not been handled.
    pub fn is_busy(&self) -> bool {
        self.loading || self.controller.is_navigating()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn day_jump(&self) -> i64 {
        self.day_jump
    }

    pub fn layout(&self) -> Layout {
        self.controller.layout()
    }

    pub fn last_shift(&self) -> Option<ShiftOutcome> {
        self.controller.last_shift()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn status(&self) -> DashboardStatus {
        if self.location.is_none() {
            return DashboardStatus::Unconfigured;
        }
        if self.loading {
            return DashboardStatus::Loading;
        }
        let Some(window) = self.controller.window() else {
            return DashboardStatus::Loading;
        };
        let primary_resolved = matches!(self.cache.get(window.primary), Lookup::Present(_));
        if !primary_resolved && self.has_load_error() {
            DashboardStatus::ConnectionError
        } else {
            DashboardStatus::Ready
        }
    }

    /// Day panels for the current layout, left to right.
    pub fn visible_panels(&self) -> Vec<Panel<'_>> {
        let Some(window) = self.controller.window() else {
            return Vec::new();
        };
        let wide = self.controller.layout() == Layout::Wide;
        let mut panels = Vec::with_capacity(2);
        if wide || !window.show_secondary_only {
            panels.push(self.panel(window.primary));
        }
        if let Some(secondary) = window.secondary
            && (wide || window.show_secondary_only)
        {
            panels.push(self.panel(secondary));
        }
        panels
    }

    fn panel(&self, date: CalendarDate) -> Panel<'_> {
        Panel {
            date,
            day: self.cache.get(date),
        }
    }
}
