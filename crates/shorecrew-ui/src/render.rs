//! Render layer: project current state into text fragments.
//!
//! `render_all` is total and idempotent: every visible fragment is
//! re-derived from the state on each call, so nothing stale survives a
//! state change. No incremental diffing.

use shorecrew_services::events::CommunityEvent;
use shorecrew_services::roster::CrewMember;
use shorecrew_services::Stats;
use shorecrew_weather::{Forecast, ForecastSource, UserLocation};

use crate::state::AppState;

pub fn render_all(state: &AppState) -> String {
    let mut out = String::new();
    out.push_str("== Shorecrew ==\n");
    out.push_str(&location_summary(state.location.as_ref(), state.place.as_deref()));
    out.push_str(&stat_counters(&state.stats));
    out.push_str(&forecast_cards(state.forecast.as_ref()));
    out.push_str(&crew_cards(&state.crew));
    out.push_str(&event_board(&state.events));
    out
}

pub fn location_summary(location: Option<&UserLocation>, place: Option<&str>) -> String {
    match (location, place) {
        (Some(_), Some(place)) => format!("Location: {}\n", place),
        (Some(loc), None) => format!("Location: {:.4}, {:.4}\n", loc.latitude, loc.longitude),
        (None, _) => "Location: home beach (run 'locate' to use yours)\n".to_string(),
    }
}

/// The counter line; also drawn frame by frame during animation.
pub fn stat_line(cleanups: u32, trash: u32, beaches: u32, crew_members: u32) -> String {
    format!(
        "Cleanups {:>3}  |  Trash collected {:>4}  |  Beaches impacted {}  |  Crew {:>3}",
        cleanups, trash, beaches, crew_members
    )
}

pub fn stat_counters(stats: &Stats) -> String {
    format!(
        "{}\n",
        stat_line(stats.cleanups, stats.trash, stats.beaches, stats.crew_members)
    )
}

pub fn forecast_cards(forecast: Option<&Forecast>) -> String {
    let Some(forecast) = forecast else {
        return "Forecast: not loaded yet\n".to_string();
    };

    let mut out = String::from("Forecast:\n");
    if forecast.source == ForecastSource::Mock {
        out.push_str("  (offline - showing typical conditions)\n");
    }
    for (i, day) in forecast.days.iter().enumerate() {
        let tag = if i == 0 { "  <- best day for cleanup" } else { "" };
        out.push_str(&format!(
            "  {} {}  {:<18} {}-{}%RH  {:.0}-{:.0}C  wind {:.0}km/h{}\n",
            day.condition.glyph(),
            day.date.format("%a %b %e"),
            day.condition_text,
            day.humidity_low,
            day.humidity_high,
            day.temp_low,
            day.temp_high,
            day.wind_kph,
            tag,
        ));
    }
    out
}

pub fn crew_cards(crew: &[CrewMember]) -> String {
    if crew.is_empty() {
        return "Crew: nobody yet - 'crew add <name>, <role>'\n".to_string();
    }

    let mut out = format!("Crew ({}):\n", crew.len());
    for member in crew {
        out.push_str(&format!(
            "  {:<20} {:<16} joined {}  [{}]\n",
            member.name, member.role, member.joined, member.id
        ));
    }
    out
}

pub fn event_board(events: &[CommunityEvent]) -> String {
    let mut out = String::from("Upcoming events:\n");
    for event in events {
        let marker = if event.joined { " [joined]" } else { "" };
        out.push_str(&format!(
            "  {:<6} {}  {} @ {}{}\n",
            event.id, event.date, event.title, event.beach, marker
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shorecrew_services::StoredState;
    use shorecrew_weather::mock;

    fn populated_state() -> AppState {
        let mut state = AppState::from_store(StoredState::default());
        state.add_crew("Ana Reyes", "Shore Captain");
        state.add_crew("Ben Ong", "Sorter");
        state.record_cleanup(30);
        state.set_forecast(mock::forecast(3));
        state
    }

    #[test]
    fn test_render_all_is_idempotent() {
        let state = populated_state();
        assert_eq!(render_all(&state), render_all(&state));
    }

    #[test]
    fn test_render_reflects_state_counts() {
        let state = populated_state();
        let out = render_all(&state);

        assert!(out.contains("Crew (2):"));
        assert!(out.contains("Ana Reyes"));
        assert!(out.contains("Trash collected   30"));
        assert!(out.contains("best day for cleanup"));
    }

    #[test]
    fn test_render_is_total_without_forecast() {
        let state = AppState::from_store(StoredState::default());
        let out = render_all(&state);

        assert!(out.contains("Forecast: not loaded yet"));
        assert!(out.contains("nobody yet"));
        assert!(out.contains("home beach"));
    }

    #[test]
    fn test_mock_forecast_is_labelled() {
        let state = populated_state();
        let out = render_all(&state);
        // populated_state installs a mock forecast
        assert!(out.contains("typical conditions"));
    }

    #[test]
    fn test_stale_fragments_do_not_survive_removal() {
        let mut state = populated_state();
        let id = state.crew[0].id.clone();
        state.remove_crew(&id);

        let out = render_all(&state);
        assert!(!out.contains("Ana Reyes"));
        assert!(out.contains("Crew (1):"));
    }

    #[test]
    fn test_event_board_shows_joined_marker() {
        let mut state = populated_state();
        let id = state.events[1].id.clone();
        state.join_event(&id);

        let out = event_board(&state.events);
        assert!(out.contains("[joined]"));
    }
}
