use std::ops::RangeInclusive;

use crate::domain::weather::{DayForecast, HourlyRecord, celsius_to_fahrenheit, kmh_to_mph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitGroup {
    Us,
    Metric,
}

impl UnitGroup {
    pub fn query_value(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Metric => "metric",
        }
    }

    fn temperature_unit(self) -> &'static str {
        match self {
            Self::Us => "Degrees Fahrenheit",
            Self::Metric => "Degrees Celsius",
        }
    }

    fn precip_unit(self) -> &'static str {
        match self {
            Self::Us => "inches",
            Self::Metric => "mm",
        }
    }

    fn speed_unit(self) -> &'static str {
        match self {
            Self::Us => "mph",
            Self::Metric => "km/h",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug)]
struct SlotHours {
    slot: TimeOfDay,
    representative: usize,
    chart: RangeInclusive<usize>,
    active: RangeInclusive<u32>,
}

static SLOT_TABLE: [SlotHours; 3] = [
    SlotHours {
        slot: TimeOfDay::Morning,
        representative: 8,
        chart: 8..=12,
        active: 8..=11,
    },
    SlotHours {
        slot: TimeOfDay::Afternoon,
        representative: 12,
        chart: 12..=17,
        active: 12..=16,
    },
    SlotHours {
        slot: TimeOfDay::Evening,
        representative: 17,
        chart: 17..=22,
        active: 17..=20,
    },
];

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    fn entry(self) -> &'static SlotHours {
        match self {
            Self::Morning => &SLOT_TABLE[0],
            Self::Afternoon => &SLOT_TABLE[1],
            Self::Evening => &SLOT_TABLE[2],
        }
    }

    /// Slot for a wall-clock hour; night and early morning default to Afternoon.
    pub fn for_hour(hour: u32) -> Self {
        SLOT_TABLE
            .iter()
            .find(|entry| entry.active.contains(&hour))
            .map_or(Self::Afternoon, |entry| entry.slot)
    }

    pub fn representative_hour(self) -> usize {
        self.entry().representative
    }

    pub fn chart_hours(self) -> RangeInclusive<usize> {
        self.entry().chart.clone()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    /// Representative hour of `day` for this slot.
    pub fn pick<'a>(self, day: &'a DayForecast) -> Option<&'a HourlyRecord> {
        day.hour(self.representative_hour())
    }

    /// X-axis labels for the slot's chart hours.
    pub fn axis_labels(self) -> Vec<String> {
        self.chart_hours().map(format_hour).collect()
    }
}

/// `h:00AM/PM` with midnight and noon shown as 12.
pub fn format_hour(hour: usize) -> String {
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{twelve}:00{suffix}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartCategory {
    Temperature,
    Precipitation,
    HumidityUv,
    Wind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f32>,
}

impl ChartCategory {
    pub const ALL: [ChartCategory; 4] = [
        Self::Temperature,
        Self::Precipitation,
        Self::HumidityUv,
        Self::Wind,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Precipitation => "Precipitation",
            Self::HumidityUv => "Humidity / UV",
            Self::Wind => "Wind",
        }
    }

    /// The two series charted for this category, sliced to the slot's hours.
    pub fn series(self, day: &DayForecast, slot: TimeOfDay, units: UnitGroup) -> [ChartSeries; 2] {
        let (first, second) = self.labels(units);
        let (first_values, second_values): (Vec<f32>, Vec<f32>) = day.hours()
            [slot.chart_hours()]
            .iter()
            .map(|hour| self.values(hour))
            .unzip();
        [
            ChartSeries {
                label: first,
                values: first_values,
            },
            ChartSeries {
                label: second,
                values: second_values,
            },
        ]
    }

    fn values(self, hour: &HourlyRecord) -> (f32, f32) {
        match self {
            Self::Temperature => (hour.temperature, hour.feels_like),
            Self::Precipitation => (hour.precip_probability, hour.precip_amount),
            Self::HumidityUv => (hour.humidity, hour.uv_index),
            Self::Wind => (hour.wind_speed, hour.wind_gust),
        }
    }

    fn labels(self, units: UnitGroup) -> (String, String) {
        match self {
            Self::Temperature => (
                format!("Temperature ({})", units.temperature_unit()),
                format!("Feels Like ({})", units.temperature_unit()),
            ),
            Self::Precipitation => (
                "Precipitation Probability".to_string(),
                format!("Precipitation ({})", units.precip_unit()),
            ),
            Self::HumidityUv => ("Percent Humidity".to_string(), "UV Index".to_string()),
            Self::Wind => (
                format!("Wind Speed ({})", units.speed_unit()),
                format!("Wind Gust ({})", units.speed_unit()),
            ),
        }
    }
}

/// Headline for the slot's representative hour. Thresholds are in °F and mph.
pub fn day_message(day: Option<&DayForecast>, slot: TimeOfDay, units: UnitGroup) -> &'static str {
    let Some(hour) = day.and_then(|day| slot.pick(day)) else {
        return "Have a great day!";
    };
    let (temp, gust) = match units {
        UnitGroup::Us => (hour.temperature, hour.wind_gust),
        UnitGroup::Metric => (
            celsius_to_fahrenheit(hour.temperature),
            kmh_to_mph(hour.wind_gust),
        ),
    };

    if hour.precip_probability > 50.0 {
        return if temp > 35.0 {
            "Don't forget your umbrella!"
        } else {
            "Winter Wonderland!"
        };
    }
    if temp < 40.0 {
        return "Bundle up out there!";
    }
    if temp > 85.0 {
        return "Stay cool and hydrated today!";
    }
    if gust > 25.0 {
        return "It might be windy, hold onto your hat!";
    }
    if hour.humidity > 80.0 {
        return "A little bit muggy out there!";
    }
    if hour.conditions.to_lowercase().contains("cloudy") {
        return "Leave the sunglasses at home!";
    }
    if temp > 60.0 && temp < 85.0 && hour.precip_probability < 10.0 {
        return "Perfect Day!";
    }
    "Enjoy the weather today!"
}
