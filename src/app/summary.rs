use crate::{
    app::session::{ForecastSession, Panel},
    domain::{
        daypart::{ChartCategory, ChartSeries, TimeOfDay, UnitGroup, day_message},
        weather::{IconMode, Location, icon_glyph, round_temp},
    },
};

/// How the visible panels should be summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryView {
    pub slot: TimeOfDay,
    pub category: ChartCategory,
    pub units: UnitGroup,
    pub icons: IconMode,
}

/// Plain-text rendering of the session's visible day panels.
pub fn render_summary(session: &ForecastSession, view: SummaryView) -> String {
    let mut lines = vec![
        session
            .location()
            .map_or_else(|| "No location".to_string(), Location::display_name),
        format!("Status: {}", session.status()),
        format!("{} / {}", view.slot.label(), view.category.title()),
    ];
    for panel in session.visible_panels() {
        lines.push(String::new());
        append_panel(&mut lines, panel, view);
    }
    lines.join("\n")
}

fn append_panel(lines: &mut Vec<String>, panel: Panel<'_>, view: SummaryView) {
    let day = panel.day.day();
    let message = day_message(day, view.slot, view.units);
    let title = format!("{} {}", panel.date.weekday_name(), panel.date.month_day());

    let Some(day) = day else {
        lines.push(format!("{title}  --  {message}"));
        lines.push("  No forecast for this date".to_string());
        return;
    };

    let headline = view.slot.pick(day).map_or_else(
        || "--".to_string(),
        |hour| {
            format!(
                "{} {}{}",
                icon_glyph(hour.icon, view.icons),
                round_temp(hour.temperature),
                temp_suffix(view.units)
            )
        },
    );
    lines.push(format!("{title}  {headline}  {message}"));
    lines.push(format!("  Hours: {}", view.slot.axis_labels().join(" ")));
    for series in view.category.series(day, view.slot, view.units) {
        lines.push(series_line(&series));
    }
}

fn series_line(series: &ChartSeries) -> String {
    let values: Vec<String> = series.values.iter().map(|v| format_value(*v)).collect();
    format!("  {}: {}", series.label, values.join(" "))
}

fn format_value(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn temp_suffix(units: UnitGroup) -> &'static str {
    match units {
        UnitGroup::Us => "°F",
        UnitGroup::Metric => "°C",
    }
}
