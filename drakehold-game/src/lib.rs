//! Drakehold Game Engine
//!
//! Platform-agnostic core logic for the Drakehold dungeon-management game.
//! This crate provides the full simulation — room grid, dungeon objects,
//! adventurer agents, day waves, and the economy — without UI or
//! platform-specific dependencies. A host constructs a [`DungeonSim`],
//! applies build actions between raids, and drives `fixed_update` once per
//! frame.

pub mod adventurer;
pub mod build;
pub mod constants;
pub mod costs;
pub mod economy;
pub mod effects;
pub mod geometry;
pub mod grid;
pub mod numbers;
pub mod objects;
pub mod rng;
pub mod sim;
pub mod wave;

// Re-export commonly used types
pub use adventurer::{Adventurer, AdventurerFate};
pub use build::{ActionError, dig_room, place_object, sell_object};
pub use costs::CostTable;
pub use economy::{
    DayReport, EconomyState, OutcomeKind, OutcomeLine, OutcomeRecord, OutcomeTags, settle_day,
};
pub use effects::{Effect, EffectKind, EffectPool};
pub use geometry::Vec2;
pub use grid::{Connectivity, Direction, Room, RoomCoord, RoomGrid};
pub use objects::{DungeonObject, ObjectFate, ObjectKind, VisitCtx};
pub use rng::{CountingRng, RngStreams};
pub use sim::DungeonSim;
pub use wave::WaveManager;
