use tracing::{debug, info};

use crate::{
    app::cache::DateCache,
    data::forecast::ForecastProvider,
    domain::{calendar::CalendarDate, weather::Location},
};

/// Days around the anchor fetched when a location is adopted.
pub const NEIGHBORHOOD_OFFSETS: [i64; 5] = [-14, -7, 0, 7, 14];

/// Viewports narrower than this show a single day panel.
pub const NARROW_BREAKPOINT_PX: u32 = 1100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Wide,
    Narrow,
}

impl Layout {
    pub fn from_width(width_px: u32) -> Self {
        if width_px < NARROW_BREAKPOINT_PX {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

/// The pair of dates on screen.
///
/// `secondary` is normally `primary + 7`. `show_secondary_only` only matters
/// in the narrow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub primary: CalendarDate,
    pub secondary: Option<CalendarDate>,
    pub show_secondary_only: bool,
}

impl Window {
    pub fn anchored(anchor: CalendarDate) -> Self {
        Self {
            primary: anchor,
            secondary: Some(anchor.shift_week(true)),
            show_secondary_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOutcome {
    /// Both dates moved a week.
    Advanced {
        primary: CalendarDate,
        secondary: CalendarDate,
    },
    /// End of forecast data in the narrow layout: keep the dates, show only
    /// the secondary panel.
    SecondaryOnly,
    /// Nothing usable to move to; window untouched.
    Frozen,
}

/// Decides a week shift from what the cache returned for the shifted dates.
pub fn decide_shift(
    new_primary: (CalendarDate, bool),
    new_secondary: Option<(CalendarDate, bool)>,
    layout: Layout,
) -> ShiftOutcome {
    let (primary, primary_ok) = new_primary;
    match new_secondary {
        Some((secondary, true)) if primary_ok && primary != secondary => {
            ShiftOutcome::Advanced { primary, secondary }
        }
        Some((_, false)) if primary_ok && layout == Layout::Narrow => ShiftOutcome::SecondaryOnly,
        _ => ShiftOutcome::Frozen,
    }
}

/// Snapshot handed to a shift task while the controller is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPlan {
    pub forward: bool,
    pub window: Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftResolution {
    pub outcome: ShiftOutcome,
    pub load_failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub window: Window,
    pub load_failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reanchor {
    /// `None` when the new anchor date has no data.
    pub window: Option<Window>,
    pub load_failed: bool,
}

/// Owns the visible window and serialises navigation on it.
#[derive(Debug, Default)]
pub struct WindowController {
    window: Option<Window>,
    layout: Layout,
    navigating: bool,
    last_shift: Option<ShiftOutcome>,
}

impl WindowController {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    pub fn last_shift(&self) -> Option<ShiftOutcome> {
        self.last_shift
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        if layout == Layout::Wide
            && let Some(window) = self.window.as_mut()
        {
            window.show_secondary_only = false;
        }
    }

    /// Drops the window and releases any navigation lock.
    pub fn clear(&mut self) {
        self.window = None;
        self.navigating = false;
        self.last_shift = None;
    }

    pub fn publish(&mut self, window: Window) {
        self.window = Some(window);
        self.navigating = false;
    }

    /// Takes the navigation lock. `None` if there is no window yet or another
    /// navigation is still in flight.
    pub fn begin_shift(&mut self, forward: bool) -> Option<ShiftPlan> {
        let window = self.begin_navigation()?;
        Some(ShiftPlan { forward, window })
    }

    pub fn begin_navigation(&mut self) -> Option<Window> {
        if self.navigating {
            return None;
        }
        let window = self.window?;
        self.navigating = true;
        Some(window)
    }

    pub fn finish_shift(&mut self, outcome: ShiftOutcome) {
        self.navigating = false;
        self.last_shift = Some(outcome);
        let Some(window) = self.window.as_mut() else {
            return;
        };
        match outcome {
            ShiftOutcome::Advanced { primary, secondary } => {
                window.primary = primary;
                window.secondary = Some(secondary);
            }
            ShiftOutcome::SecondaryOnly => window.show_secondary_only = true,
            ShiftOutcome::Frozen => {}
        }
    }

    pub fn finish_reanchor(&mut self, window: Option<Window>) {
        self.navigating = false;
        if let Some(window) = window {
            self.window = Some(window);
        }
    }
}

/// Fetches the five-date neighbourhood around `anchor` into `cache`.
pub async fn initialize(
    cache: &mut DateCache,
    provider: &dyn ForecastProvider,
    location: &Location,
    anchor: CalendarDate,
) -> Neighborhood {
    let mut load_failed = false;
    for offset in NEIGHBORHOOD_OFFSETS {
        let ensured = cache.ensure(provider, location, anchor.add_days(offset)).await;
        load_failed |= ensured.load_failed;
    }
    info!(%anchor, cached = cache.len(), load_failed, "neighbourhood ready");
    Neighborhood {
        window: Window::anchored(anchor),
        load_failed,
    }
}

pub async fn resolve_shift(
    cache: &mut DateCache,
    provider: &dyn ForecastProvider,
    location: &Location,
    plan: ShiftPlan,
    layout: Layout,
) -> ShiftResolution {
    let new_primary = plan.window.primary.shift_week(plan.forward);
    let primary = cache.ensure(provider, location, new_primary).await;
    let mut load_failed = primary.load_failed;

    let mut new_secondary = None;
    if let Some(secondary_date) = plan.window.secondary {
        let shifted = secondary_date.shift_week(plan.forward);
        let secondary = cache.ensure(provider, location, shifted).await;
        load_failed |= secondary.load_failed;
        new_secondary = Some((shifted, secondary.slot.is_usable()));
    }

    let outcome = decide_shift(
        (new_primary, primary.slot.is_usable()),
        new_secondary,
        layout,
    );
    debug!(forward = plan.forward, ?outcome, "shift resolved");
    ShiftResolution {
        outcome,
        load_failed,
    }
}

/// Moves the window to a new anchor day, e.g. after a weekday pick.
pub async fn reanchor(
    cache: &mut DateCache,
    provider: &dyn ForecastProvider,
    location: &Location,
    anchor: CalendarDate,
) -> Reanchor {
    let primary = cache.ensure(provider, location, anchor).await;
    let secondary = cache
        .ensure(provider, location, anchor.shift_week(true))
        .await;
    let load_failed = primary.load_failed || secondary.load_failed;

    // The secondary date is kept even without data so later shifts can retry it.
    let window = primary
        .slot
        .is_usable()
        .then(|| Window::anchored(anchor));
    Reanchor {
        window,
        load_failed,
    }
}
