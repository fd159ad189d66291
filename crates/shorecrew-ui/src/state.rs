//! The application state value.
//!
//! One `AppState` is owned by the controller; every mutation funnels
//! through a named operation here so the stats invariants cannot drift:
//! `crew_members` always mirrors the roster length, and `beaches` is
//! always derived from `cleanups`.

use shorecrew_services::events::{self, CommunityEvent};
use shorecrew_services::roster::{self, CrewMember};
use shorecrew_services::{Stats, StoredState};
use shorecrew_weather::{Forecast, UserLocation};

#[derive(Debug)]
pub struct AppState {
    pub crew: Vec<CrewMember>,
    pub stats: Stats,
    pub events: Vec<CommunityEvent>,
    pub forecast: Option<Forecast>,
    pub location: Option<UserLocation>,
    pub place: Option<String>,
}

impl AppState {
    /// Rebuild session state from the persisted slots. The event board is
    /// reseeded, not persisted.
    pub fn from_store(loaded: StoredState) -> Self {
        Self {
            crew: loaded.crew,
            stats: loaded.stats,
            events: events::seed_events(),
            forecast: None,
            location: None,
            place: None,
        }
    }

    /// Append a new crew member and sync the mirror count.
    pub fn add_crew(&mut self, name: impl Into<String>, role: impl Into<String>) -> CrewMember {
        let member = CrewMember::new(name, role);
        self.crew.push(member.clone());
        self.stats.recount_crew(self.crew.len());
        member
    }

    /// Remove a crew member by id and sync the mirror count.
    /// An unknown id leaves the roster unchanged.
    pub fn remove_crew(&mut self, id: &str) -> bool {
        let removed = roster::remove_by_id(&mut self.crew, id);
        self.stats.recount_crew(self.crew.len());
        removed
    }

    /// Record a scheduled cleanup with the given trash haul.
    pub fn record_cleanup(&mut self, trash_collected: u32) {
        self.stats.record_cleanup(trash_collected);
    }

    /// Replace the forecast wholesale with the latest fetch result.
    pub fn set_forecast(&mut self, forecast: Forecast) {
        self.forecast = Some(forecast);
    }

    /// Store the granted position and its resolved place name.
    pub fn set_location(&mut self, location: UserLocation, place: Option<String>) {
        self.location = Some(location);
        self.place = place;
    }

    /// Join a listed event. Returns its title, or `None` if the id is not
    /// on the board or already joined.
    pub fn join_event(&mut self, id: &str) -> Option<String> {
        events::join(&mut self.events, id).map(|e| e.title.clone())
    }
}
