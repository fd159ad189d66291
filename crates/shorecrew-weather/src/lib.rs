//! Weather service for Shorecrew
//!
//! Fetches a short-range beach forecast from the configured public
//! endpoints and degrades to a deterministic mock forecast when the live
//! call fails, so the dashboard always has something to render.

pub mod geocode;
pub mod locate;
pub mod mock;
pub mod provider;
pub mod types;

pub use geocode::reverse_geocode;
pub use provider::ForecastProvider;
pub use types::*;
