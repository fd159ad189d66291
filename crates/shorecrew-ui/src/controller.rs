//! The dashboard controller.
//!
//! Owns the application state, the slot store, and the forecast provider.
//! Every user action funnels through one handler here: mutate state, ask
//! the store to save, re-render, notify. Fetches are awaited straight-line
//! on the runtime; there is no cancellation, so overlapping refreshes
//! resolve in completion order and the last render wins.

use std::io::Write as _;

use anyhow::Result;
use rand::Rng;

use shorecrew_core::{AppError, Config, WeatherError};
use shorecrew_services::{SlotStore, Stats};
use shorecrew_weather::{locate, reverse_geocode, ForecastProvider};

use crate::command::{Command, HELP_TEXT};
use crate::counter::Counter;
use crate::render;
use crate::state::AppState;

/// Items pledged per scheduled cleanup
const TRASH_HAUL_RANGE: std::ops::RangeInclusive<u32> = 8..=40;

pub struct Controller {
    state: AppState,
    store: SlotStore,
    provider: ForecastProvider,
    animate_counters: bool,
    counter_duration_ms: u64,
    /// Last values drawn, the starting point for counter animation
    last_stats: Stats,
}

impl Controller {
    pub fn new(config: &Config) -> Result<Self> {
        let store = SlotStore::new(&config.store.data_dir);
        let provider = ForecastProvider::new(
            config.weather.realtime_url.clone(),
            config.weather.forecast_url.clone(),
            config.weather.forecast_days as usize,
        )?;

        let state = AppState::from_store(store.load());
        let last_stats = state.stats.clone();
        tracing::info!(
            crew = state.crew.len(),
            cleanups = state.stats.cleanups,
            "session state loaded"
        );

        Ok(Self {
            state,
            store,
            provider,
            animate_counters: config.ui.animate_counters,
            counter_duration_ms: config.ui.counter_duration_ms,
            last_stats,
        })
    }

    /// Initial load: fetch a forecast for the reference area and draw.
    pub async fn startup(&mut self) {
        self.refresh_forecast().await;
        self.render().await;
        self.notify("Welcome back. Type 'help' for commands.");
    }

    /// Dispatch one command. Returns false when the session should end.
    pub async fn handle(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::AddCrew { name, role } => {
                let member = self.state.add_crew(name, role);
                self.persist();
                self.render().await;
                self.notify(format!("{} joined the crew as {}", member.name, member.role));
            }
            Command::RemoveCrew { id } => {
                if self.state.remove_crew(&id) {
                    self.persist();
                    self.render().await;
                    self.notify("Crew member removed");
                } else {
                    self.notify("No crew member with that id");
                }
            }
            Command::Schedule => {
                let haul = rand::thread_rng().gen_range(TRASH_HAUL_RANGE);
                self.state.record_cleanup(haul);
                self.persist();
                self.render().await;
                self.notify(format!("Cleanup scheduled, {} items pledged", haul));
            }
            Command::Locate => {
                self.enable_location().await;
            }
            Command::Refresh => {
                self.refresh_forecast().await;
                self.render().await;
            }
            Command::Events => {
                println!("{}", render::event_board(&self.state.events));
            }
            Command::Join { id } => match self.state.join_event(&id) {
                Some(title) => {
                    self.render().await;
                    self.notify(format!("See you at {}!", title));
                }
                None => self.notify("No open event with that id"),
            },
            Command::Status => {
                self.render().await;
            }
            Command::Help => {
                println!("{}", HELP_TEXT);
            }
            Command::Quit => {
                self.persist();
                tracing::info!("session ended");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Ask for a position grant; on denial show a transient notice and
    /// abort, leaving the dashboard usable.
    async fn enable_location(&mut self) {
        match locate::current_location().await {
            Ok(location) => {
                let place = reverse_geocode(&location).await;
                self.state.set_location(location, place);
                self.refresh_forecast().await;
                self.render().await;
            }
            Err(e) => {
                tracing::debug!("location grant failed: {}", e);
                let err = AppError::Weather(WeatherError::LocationUnavailable(e.to_string()));
                self.notify(err.user_message());
            }
        }
    }

    /// Fetch and install a forecast; the provider never errors, it tags
    /// the result live or mock.
    async fn refresh_forecast(&mut self) {
        let forecast = self.provider.fetch(self.state.location.as_ref()).await;
        self.state.set_forecast(forecast);
    }

    fn persist(&self) {
        self.store.save(&self.state.crew, &self.state.stats);
    }

    async fn render(&mut self) {
        if self.animate_counters
            && self.counter_duration_ms > 0
            && self.last_stats != self.state.stats
        {
            self.animate_stat_change().await;
        }
        self.last_stats = self.state.stats.clone();
        println!("{}", render::render_all(&self.state));
    }

    /// Draw the counter line frame by frame toward the new values.
    async fn animate_stat_change(&self) {
        let prev = &self.last_stats;
        let next = &self.state.stats;
        let d = self.counter_duration_ms;
        let mut counters = [
            Counter::new(prev.cleanups, next.cleanups, d),
            Counter::new(prev.trash, next.trash, d),
            Counter::new(prev.beaches, next.beaches, d),
            Counter::new(prev.crew_members, next.crew_members, d),
        ];

        loop {
            let frame: Vec<Option<u32>> = counters.iter_mut().map(|c| c.next()).collect();
            if frame.iter().all(Option::is_none) {
                break;
            }
            let values: Vec<u32> = frame
                .iter()
                .zip(&counters)
                .map(|(v, c)| v.unwrap_or_else(|| c.target()))
                .collect();
            print!(
                "\r{}",
                render::stat_line(values[0], values[1], values[2], values[3])
            );
            let _ = std::io::stdout().flush();
            tokio::time::sleep(Counter::frame_interval()).await;
        }
        println!();
    }

    fn notify(&self, message: impl AsRef<str>) {
        tracing::info!("{}", message.as_ref());
        println!("* {}", message.as_ref());
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::tempdir;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.store.data_dir = dir.to_path_buf();
        // Keep handler tests fast and output-free
        config.ui.animate_counters = false;
        config
    }

    #[tokio::test]
    async fn test_add_and_remove_funnel_through_state() {
        let dir = tempdir().unwrap();
        let mut controller = Controller::new(&test_config(dir.path())).unwrap();

        controller
            .handle(Command::AddCrew {
                name: "Ana".to_string(),
                role: "Shore Captain".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(controller.state().crew.len(), 1);
        assert_eq!(controller.state().stats.crew_members, 1);

        let id = controller.state().crew[0].id.clone();
        controller.handle(Command::RemoveCrew { id }).await.unwrap();
        assert_eq!(controller.state().crew.len(), 0);
        assert_eq!(controller.state().stats.crew_members, 0);
    }

    #[tokio::test]
    async fn test_mutations_are_persisted_across_controllers() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path());

        {
            let mut controller = Controller::new(&config).unwrap();
            controller
                .handle(Command::AddCrew {
                    name: "Ben".to_string(),
                    role: "Sorter".to_string(),
                })
                .await
                .unwrap();
            controller.handle(Command::Schedule).await.unwrap();
        }

        let reloaded = Controller::new(&config).unwrap();
        assert_eq!(reloaded.state().crew.len(), 1);
        assert_eq!(reloaded.state().crew[0].name, "Ben");
        assert_eq!(reloaded.state().stats.cleanups, 1);
        assert_eq!(reloaded.state().stats.crew_members, 1);
    }

    #[tokio::test]
    async fn test_schedule_keeps_beach_cap() {
        let dir = tempdir().unwrap();
        let mut controller = Controller::new(&test_config(dir.path())).unwrap();

        for _ in 0..7 {
            controller.handle(Command::Schedule).await.unwrap();
        }
        let stats = &controller.state().stats;
        assert_eq!(stats.cleanups, 7);
        assert_eq!(stats.beaches, 5);
        assert!(stats.trash >= 7 * *TRASH_HAUL_RANGE.start());
    }

    #[tokio::test]
    async fn test_quit_requests_exit() {
        let dir = tempdir().unwrap();
        let mut controller = Controller::new(&test_config(dir.path())).unwrap();
        assert!(!controller.handle(Command::Quit).await.unwrap());
    }
}
