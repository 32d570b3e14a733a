//! Centralized balance and tuning constants for the Drakehold simulation.
//!
//! These values define the deterministic math for the core loop. Keeping
//! them together ensures gameplay can only be adjusted via code changes
//! reviewed in version control.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_DAY_START: &str = "log.day.start";
pub(crate) const LOG_DAY_END: &str = "log.day.end";
pub(crate) const LOG_WAVE_SPAWN: &str = "log.wave.spawn";
pub(crate) const LOG_RESULT_PREFIX: &str = "log.result.";
pub(crate) const LOG_TRIBUTE: &str = "log.economy.tribute";

// Room grid ----------------------------------------------------------------
pub(crate) const ROOM_SPACING_X: f64 = 4.0;
pub(crate) const ROOM_SPACING_Y: f64 = 6.0;
pub(crate) const ROOM_LOOKUP_TOLERANCE: f64 = 2.0;
pub(crate) const ENTRANCE_BOUNDARY_X: f64 = 1.0;

// Adventurer movement ------------------------------------------------------
pub(crate) const WALK_SPEED: f64 = 0.08;
pub(crate) const FLEE_SPEED_FACTOR: f64 = 1.5;
pub(crate) const EXIT_WALK_SPEED: f64 = 0.1;
pub(crate) const ARRIVAL_RADIUS: f64 = 0.1;
pub(crate) const ROOM_ENTER_RADIUS: f64 = 1.0;
pub(crate) const EXIT_BOUNDARY_X: f64 = -4.0;
pub(crate) const SPAWN_POSITION_X: f64 = -4.0;

// Wave spawning ------------------------------------------------------------
pub(crate) const WAVE_MIN_SPAWNS: i32 = 2;
pub(crate) const WAVE_MAX_SPAWNS: i32 = 10;
pub(crate) const RISK_SPAWN_EXPONENT: f64 = 0.3;
pub(crate) const FIRST_SPAWN_DELAY_TICKS: i32 = 20;
pub(crate) const SPAWN_DELAY_MIN_TICKS: i32 = 80;
pub(crate) const SPAWN_DELAY_MAX_TICKS: i32 = 140;
pub(crate) const WAVE_DONE_GRACE_TICKS: i32 = 100;

// Dungeon objects ----------------------------------------------------------
pub(crate) const SPIKE_DAMAGE: i32 = 1;
pub(crate) const FIRE_DAMAGE: i32 = 4;
pub(crate) const SPIKE_BODY_FEAR: i32 = 1;
pub(crate) const FIRE_BODY_FEAR: i32 = 2;
pub(crate) const BODY_FEAR: i32 = 1;
pub(crate) const LOOT_FEAR: i32 = 1;
pub(crate) const LOOT_GRANT: i32 = 100;
pub(crate) const DECAY_DAYS: u8 = 5;

// Outcome formulas ---------------------------------------------------------
pub(crate) const DEATH_MONEY_BASE: i32 = 20;
pub(crate) const DEATH_MONEY_PER_LEVEL: i32 = 30;
pub(crate) const SPIKE_DEATH_RISK_PER_LEVEL: f32 = 1.5;
pub(crate) const FIRE_DEATH_RISK_PER_LEVEL: f32 = 2.5;
pub(crate) const FIRE_DEATH_DECEPTION: f32 = 1.0;
pub(crate) const LOOT_REWARD_DIVISOR: f32 = 80.0;
pub(crate) const FLED_DECEPTION_FACTOR: f32 = 1.1;
pub(crate) const ESCAPED_LEVEL_FACTOR: f32 = 0.2;

// Economy ------------------------------------------------------------------
pub(crate) const STARTING_MONEY: i32 = 30;
pub(crate) const STAT_DECAY: f32 = 0.95;
pub(crate) const TAG_STRONG_THRESHOLD: f32 = 2.0;

// Placement costs ----------------------------------------------------------
pub(crate) const DIG_COST: i32 = 10;
pub(crate) const SPIKE_TRAP_COST: i32 = 30;
pub(crate) const LOOT_COST: i32 = 100;
pub(crate) const FIRE_TRAP_COST: i32 = 300;
pub(crate) const SLIME_COST: i32 = 200;

// Transient effects --------------------------------------------------------
pub(crate) const SCARE_EFFECT_TICKS: u32 = 30;
pub(crate) const SCARE_EFFECT_OFFSET_Y: f64 = 1.2;
pub(crate) const FIRE_BURST_SPARKS: usize = 100;
pub(crate) const FIRE_SPARK_MIN_TICKS: u32 = 50;
pub(crate) const FIRE_SPARK_MAX_TICKS: u32 = 150;
pub(crate) const FIRE_SPARK_MIN_SPEED: f64 = 0.1;
pub(crate) const FIRE_SPARK_MAX_SPEED: f64 = 1.0;
pub(crate) const FIRE_SPARK_DRIFT: f64 = 0.1;
pub(crate) const FIRE_SPARK_DRAG: f64 = 0.99;
