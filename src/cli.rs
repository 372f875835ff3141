#![allow(clippy::missing_errors_doc)]

use chrono::{Local, Timelike, Weekday};
use clap::{Parser, ValueEnum};

use crate::{
    app::window::Layout,
    domain::{
        calendar::{CalendarDate, Today},
        daypart::{ChartCategory, TimeOfDay, UnitGroup},
        weather::{IconMode, Location},
    },
};

pub const API_KEY_ENV: &str = "VISUAL_CROSSING_KEY";

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Us,
    Metric,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LayoutArg {
    Wide,
    Narrow,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ShiftArg {
    Forward,
    Back,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TimeOfDayArg {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CategoryArg {
    Temperature,
    Precipitation,
    HumidityUv,
    Wind,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum WeekdayArg {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "weekcast",
    version,
    about = "Two-week forecast pager for a single location"
)]
pub struct Cli {
    /// Latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Display name for the location
    #[arg(long)]
    pub label: Option<String>,

    /// Jump to the next occurrence of this weekday
    #[arg(long, value_enum)]
    pub day: Option<WeekdayArg>,

    /// Time of day to summarise (default: from the local clock)
    #[arg(long, value_enum)]
    pub time_of_day: Option<TimeOfDayArg>,

    /// Chart category
    #[arg(long, value_enum, default_value_t = CategoryArg::Temperature)]
    pub category: CategoryArg,

    /// Panel layout
    #[arg(long, value_enum, default_value_t = LayoutArg::Wide)]
    pub layout: LayoutArg,

    /// Week shifts applied after loading, in order
    #[arg(long, value_enum)]
    pub shift: Vec<ShiftArg>,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<CalendarDate>,

    /// Unit group requested from the provider
    #[arg(long, value_enum, default_value_t = UnitsArg::Us)]
    pub units: UnitsArg,

    /// Timeline endpoint override
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// API key (default: $VISUAL_CROSSING_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Force ASCII icons
    #[arg(long)]
    pub ascii_icons: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (None, None) => anyhow::bail!("a location is required: pass --lat and --lon"),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<Location> {
        let (lat, lon) = (self.lat?, self.lon?);
        Some(match &self.label {
            Some(label) => Location::new(lat, lon, label.clone()),
            None => Location::from_coords(lat, lon),
        })
    }

    pub fn api_key(&self) -> anyhow::Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => anyhow::bail!("no API key: pass --api-key or set {API_KEY_ENV}"),
        }
    }

    #[must_use]
    pub fn today(&self) -> Today {
        self.today.map_or(Today::Local, Today::Fixed)
    }

    #[must_use]
    pub fn units(&self) -> UnitGroup {
        match self.units {
            UnitsArg::Us => UnitGroup::Us,
            UnitsArg::Metric => UnitGroup::Metric,
        }
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        match self.layout {
            LayoutArg::Wide => Layout::Wide,
            LayoutArg::Narrow => Layout::Narrow,
        }
    }

    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        match self.time_of_day {
            Some(TimeOfDayArg::Morning) => TimeOfDay::Morning,
            Some(TimeOfDayArg::Afternoon) => TimeOfDay::Afternoon,
            Some(TimeOfDayArg::Evening) => TimeOfDay::Evening,
            None => TimeOfDay::for_hour(Local::now().hour()),
        }
    }

    #[must_use]
    pub fn category(&self) -> ChartCategory {
        match self.category {
            CategoryArg::Temperature => ChartCategory::Temperature,
            CategoryArg::Precipitation => ChartCategory::Precipitation,
            CategoryArg::HumidityUv => ChartCategory::HumidityUv,
            CategoryArg::Wind => ChartCategory::Wind,
        }
    }

    #[must_use]
    pub fn weekday(&self) -> Option<Weekday> {
        self.day.map(|day| match day {
            WeekdayArg::Sun => Weekday::Sun,
            WeekdayArg::Mon => Weekday::Mon,
            WeekdayArg::Tue => Weekday::Tue,
            WeekdayArg::Wed => Weekday::Wed,
            WeekdayArg::Thu => Weekday::Thu,
            WeekdayArg::Fri => Weekday::Fri,
            WeekdayArg::Sat => Weekday::Sat,
        })
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else {
            IconMode::Unicode
        }
    }
}
