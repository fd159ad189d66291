//! Local services for Shorecrew: the volunteer roster, aggregate cleanup
//! stats, the community event board, and slot-based persistence.

pub mod events;
pub mod roster;
pub mod stats;
pub mod store;

pub use events::CommunityEvent;
pub use roster::CrewMember;
pub use stats::Stats;
pub use store::{SlotStore, StoredState};
