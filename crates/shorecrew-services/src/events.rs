//! Community event board.
//!
//! A seeded list of upcoming cleanups. Joining flips a flag on the listed
//! event; the board is rebuilt from the seed on every launch, it is not
//! persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityEvent {
    pub id: String,
    pub title: String,
    pub beach: String,
    /// Display date
    pub date: String,
    pub joined: bool,
}

/// The upcoming events shown on the board.
pub fn seed_events() -> Vec<CommunityEvent> {
    let seed = [
        ("ev-1", "Saturday Sunrise Sweep", "East Coast Park", "Sat, Aug  8"),
        ("ev-2", "Mangrove Edge Cleanup", "Pasir Ris Beach", "Sun, Aug 16"),
        ("ev-3", "Full Moon Night Haul", "Changi Beach", "Fri, Aug 28"),
    ];

    seed.into_iter()
        .map(|(id, title, beach, date)| CommunityEvent {
            id: id.to_string(),
            title: title.to_string(),
            beach: beach.to_string(),
            date: date.to_string(),
            joined: false,
        })
        .collect()
}

/// Mark the event with the given id as joined.
///
/// Returns the joined event, or `None` if the id is not on the board or the
/// event was already joined.
pub fn join<'a>(events: &'a mut [CommunityEvent], id: &str) -> Option<&'a CommunityEvent> {
    let event = events.iter_mut().find(|e| e.id == id)?;
    if event.joined {
        return None;
    }
    event.joined = true;
    tracing::info!("joined event {} ({})", event.id, event.title);
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_not_joined() {
        let events = seed_events();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| !e.joined));
    }

    #[test]
    fn test_join_flips_flag_once() {
        let mut events = seed_events();
        let id = events[0].id.clone();

        assert!(join(&mut events, &id).is_some());
        assert!(events[0].joined);

        // Joining again is a no-op
        assert!(join(&mut events, &id).is_none());
    }

    #[test]
    fn test_join_unknown_id() {
        let mut events = seed_events();
        assert!(join(&mut events, "ev-999").is_none());
        assert!(events.iter().all(|e| !e.joined));
    }
}
