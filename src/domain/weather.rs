use std::sync::Arc;

use thiserror::Error;

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Unicode,
    Ascii,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }

    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self::new(lat, lon, format!("{lat:.4}, {lon:.4}"))
    }

    pub fn display_name(&self) -> String {
        format!(
            "{} ({:.4}, {:.4})",
            self.label, self.latitude, self.longitude
        )
    }

    /// Identity is the coordinate pair only; the label is cosmetic.
    pub fn same_place(&self, other: &Location) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

/// One hour of forecast data, in the provider's unit group.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub temperature: f32,
    pub feels_like: f32,
    pub humidity: f32,
    pub uv_index: f32,
    pub wind_speed: f32,
    pub wind_gust: f32,
    pub precip_probability: f32,
    pub precip_amount: f32,
    pub conditions: String,
    pub icon: IconKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DayError {
    #[error("provider returned no hours for the requested date")]
    NoData,
    #[error("expected 24 hourly records, got {hours}")]
    Malformed { hours: usize },
}

/// A full day of hourly records, indexed 0..24 by hour of day.
///
/// Construction enforces the 24-entry invariant, so hour lookups never need
/// to re-check the length.
#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    hours: Arc<[HourlyRecord]>,
}

impl DayForecast {
    pub fn from_hours(hours: Vec<HourlyRecord>) -> Result<Self, DayError> {
        match hours.len() {
            0 => Err(DayError::NoData),
            HOURS_PER_DAY => Ok(Self {
                hours: hours.into(),
            }),
            hours => Err(DayError::Malformed { hours }),
        }
    }

    pub fn hours(&self) -> &[HourlyRecord] {
        &self.hours
    }

    pub fn hour(&self, hour: usize) -> Option<&HourlyRecord> {
        self.hours.get(hour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKey {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Fog,
    Wind,
    Rain,
    ShowersDay,
    ShowersNight,
    Snow,
    SnowShowersDay,
    SnowShowersNight,
    RainSnow,
    RainSnowShowersDay,
    RainSnowShowersNight,
    Sleet,
    Hail,
    Thunder,
    ThunderRain,
    ThunderShowersDay,
    ThunderShowersNight,
}

impl IconKey {
    /// Maps a provider icon name; anything unrecognised shows as clear-day.
    pub fn from_key(key: &str) -> Self {
        match key {
            "clear-night" => Self::ClearNight,
            "partly-cloudy-day" => Self::PartlyCloudyDay,
            "partly-cloudy-night" => Self::PartlyCloudyNight,
            "cloudy" => Self::Cloudy,
            "fog" => Self::Fog,
            "wind" => Self::Wind,
            "rain" => Self::Rain,
            "showers-day" => Self::ShowersDay,
            "showers-night" => Self::ShowersNight,
            "snow" => Self::Snow,
            "snow-showers-day" => Self::SnowShowersDay,
            "snow-showers-night" => Self::SnowShowersNight,
            "rain-snow" => Self::RainSnow,
            "rain-snow-showers-day" => Self::RainSnowShowersDay,
            "rain-snow-showers-night" => Self::RainSnowShowersNight,
            "sleet" => Self::Sleet,
            "hail" => Self::Hail,
            "thunder" => Self::Thunder,
            "thunder-rain" => Self::ThunderRain,
            "thunder-showers-day" => Self::ThunderShowersDay,
            "thunder-showers-night" => Self::ThunderShowersNight,
            _ => Self::ClearDay,
        }
    }
}

pub fn icon_glyph(icon: IconKey, mode: IconMode) -> &'static str {
    match mode {
        IconMode::Ascii => match icon {
            IconKey::ClearDay => "SUN",
            IconKey::ClearNight => "MON",
            IconKey::PartlyCloudyDay | IconKey::PartlyCloudyNight | IconKey::Cloudy => "CLD",
            IconKey::Fog => "FOG",
            IconKey::Wind => "WND",
            IconKey::Rain | IconKey::ShowersDay | IconKey::ShowersNight => "RAN",
            IconKey::Snow
            | IconKey::SnowShowersDay
            | IconKey::SnowShowersNight
            | IconKey::RainSnow
            | IconKey::RainSnowShowersDay
            | IconKey::RainSnowShowersNight
            | IconKey::Sleet
            | IconKey::Hail => "SNW",
            IconKey::Thunder
            | IconKey::ThunderRain
            | IconKey::ThunderShowersDay
            | IconKey::ThunderShowersNight => "THN",
        },
        IconMode::Unicode => match icon {
            IconKey::ClearDay => "☀",
            IconKey::ClearNight => "☾",
            IconKey::PartlyCloudyDay | IconKey::PartlyCloudyNight | IconKey::Cloudy => "☁",
            IconKey::Fog => "░",
            IconKey::Wind => "≋",
            IconKey::Rain | IconKey::ShowersDay | IconKey::ShowersNight => "☂",
            IconKey::Snow
            | IconKey::SnowShowersDay
            | IconKey::SnowShowersNight
            | IconKey::RainSnow
            | IconKey::RainSnowShowersDay
            | IconKey::RainSnowShowersNight
            | IconKey::Sleet
            | IconKey::Hail => "❄",
            IconKey::Thunder
            | IconKey::ThunderRain
            | IconKey::ThunderShowersDay
            | IconKey::ThunderShowersNight => "⚡",
        },
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

pub fn kmh_to_mph(kmh: f32) -> f32 {
    kmh / 1.609_344
}

pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_hours;

    #[test]
    fn day_requires_exactly_24_hours() {
        assert!(DayForecast::from_hours(sample_hours(10.0)).is_ok());
        assert_eq!(DayForecast::from_hours(Vec::new()), Err(DayError::NoData));

        let mut short = sample_hours(10.0);
        short.truncate(23);
        assert_eq!(
            DayForecast::from_hours(short),
            Err(DayError::Malformed { hours: 23 })
        );

        let mut long = sample_hours(10.0);
        long.push(long[0].clone());
        assert_eq!(
            DayForecast::from_hours(long),
            Err(DayError::Malformed { hours: 25 })
        );
    }

    #[test]
    fn unknown_icons_fall_back_to_clear_day() {
        assert_eq!(IconKey::from_key("thunder-rain"), IconKey::ThunderRain);
        assert_eq!(IconKey::from_key("volcanic-ash"), IconKey::ClearDay);
        assert_eq!(icon_glyph(IconKey::Sleet, IconMode::Ascii), "SNW");
    }

    #[test]
    fn locations_compare_by_coordinates_only() {
        let a = Location::new(40.0, -75.0, "Home");
        let b = Location::new(40.0, -75.0, "Philadelphia");
        let c = Location::new(40.0001, -75.0, "Home");
        assert!(a.same_place(&b));
        assert!(!a.same_place(&c));
    }

    #[test]
    fn unit_conversions_round_as_expected() {
        assert_eq!(round_temp(celsius_to_fahrenheit(0.0)), 32);
        assert_eq!(round_temp(celsius_to_fahrenheit(20.0)), 68);
        assert_eq!(round_temp(kmh_to_mph(40.2336)), 25);
    }
}
