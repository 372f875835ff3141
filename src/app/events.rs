use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    app::{
        cache::DateCache,
        window::{self, Layout, Neighborhood, Reanchor, ShiftPlan, ShiftResolution},
    },
    data::forecast::ForecastProvider,
    domain::{calendar::CalendarDate, weather::Location},
};

/// Results of background fetch sequences, tagged with the session generation
/// they were started under.
#[derive(Debug)]
pub enum SessionEvent {
    Initialized {
        generation: u64,
        cache: DateCache,
        neighborhood: Neighborhood,
    },
    Shifted {
        generation: u64,
        cache: DateCache,
        resolution: ShiftResolution,
    },
    Reanchored {
        generation: u64,
        cache: DateCache,
        reanchor: Reanchor,
    },
}

impl SessionEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Initialized { generation, .. }
            | Self::Shifted { generation, .. }
            | Self::Reanchored { generation, .. } => *generation,
        }
    }
}

pub fn start_initialize_task(
    tx: mpsc::Sender<SessionEvent>,
    provider: Arc<dyn ForecastProvider>,
    location: Location,
    anchor: CalendarDate,
    generation: u64,
) {
    tokio::spawn(async move {
        let mut cache = DateCache::new();
        let neighborhood =
            window::initialize(&mut cache, provider.as_ref(), &location, anchor).await;
        let _ = tx
            .send(SessionEvent::Initialized {
                generation,
                cache,
                neighborhood,
            })
            .await;
    });
}

pub fn start_shift_task(
    tx: mpsc::Sender<SessionEvent>,
    provider: Arc<dyn ForecastProvider>,
    location: Location,
    mut cache: DateCache,
    plan: ShiftPlan,
    layout: Layout,
    generation: u64,
) {
    tokio::spawn(async move {
        let resolution =
            window::resolve_shift(&mut cache, provider.as_ref(), &location, plan, layout).await;
        let _ = tx
            .send(SessionEvent::Shifted {
                generation,
                cache,
                resolution,
            })
            .await;
    });
}

pub fn start_reanchor_task(
    tx: mpsc::Sender<SessionEvent>,
    provider: Arc<dyn ForecastProvider>,
    location: Location,
    mut cache: DateCache,
    anchor: CalendarDate,
    generation: u64,
) {
    tokio::spawn(async move {
        let reanchor = window::reanchor(&mut cache, provider.as_ref(), &location, anchor).await;
        let _ = tx
            .send(SessionEvent::Reanchored {
                generation,
                cache,
                reanchor,
            })
            .await;
    });
}
