//! Day manager: spawns one wave of adventurers and detects its end.
//!
//! Wave size and difficulty scale with the running reward and risk stats.
//! The wave is done once every spawned agent has left the simulation and a
//! short grace countdown has elapsed, absorbing any lag between an agent
//! vanishing and its outcome being recorded.

use rand::Rng;

use crate::constants::{
    FIRST_SPAWN_DELAY_TICKS, RISK_SPAWN_EXPONENT, SPAWN_DELAY_MAX_TICKS, SPAWN_DELAY_MIN_TICKS,
    WAVE_DONE_GRACE_TICKS, WAVE_MAX_SPAWNS, WAVE_MIN_SPAWNS,
};
use crate::economy::EconomyState;
use crate::numbers::{trunc_f32_to_i32, trunc_f64_to_i32};
use crate::rng::RngStreams;

/// Spawn scheduler for a single day.
#[derive(Debug, Clone)]
pub struct WaveManager {
    spawn_count: i32,
    spawn_delay: i32,
    max_level: i32,
    done_countdown: i32,
    done: bool,
}

impl WaveManager {
    /// Plan a wave against the current economy.
    #[must_use]
    pub fn new(economy: &EconomyState) -> Self {
        Self {
            spawn_count: planned_spawn_count(economy.risk, economy.reward),
            spawn_delay: FIRST_SPAWN_DELAY_TICKS,
            max_level: planned_max_level(economy.reward),
            done_countdown: WAVE_DONE_GRACE_TICKS,
            done: false,
        }
    }

    /// Spawns still owed this day.
    #[must_use]
    pub const fn pending_spawns(&self) -> i32 {
        self.spawn_count
    }

    /// Highest adventurer level this wave can roll.
    #[must_use]
    pub const fn max_level(&self) -> i32 {
        self.max_level
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one tick. Returns the level of an adventurer to spawn now,
    /// if the schedule calls for one.
    pub fn tick(&mut self, live_raiders: usize, rng: &RngStreams) -> Option<i32> {
        let mut spawned = None;
        if self.spawn_count > 0 {
            if self.spawn_delay > 0 {
                self.spawn_delay -= 1;
            } else {
                let mut stream = rng.waves();
                spawned = Some(stream.random_range(1..=self.max_level));
                self.spawn_delay = stream.random_range(SPAWN_DELAY_MIN_TICKS..=SPAWN_DELAY_MAX_TICKS);
                self.spawn_count -= 1;
            }
        }
        if live_raiders == 0 && self.spawn_count == 0 && spawned.is_none() {
            if self.done_countdown > 0 {
                self.done_countdown -= 1;
            } else {
                self.done = true;
            }
        }
        spawned
    }
}

fn planned_spawn_count(risk: f32, reward: f32) -> i32 {
    let mut count = 2_i32;
    count = trunc_f64_to_i32(f64::from(count) + f64::from(reward).sqrt());
    count = trunc_f64_to_i32(f64::from(count) - f64::from(risk).powf(RISK_SPAWN_EXPONENT));
    count.clamp(WAVE_MIN_SPAWNS, WAVE_MAX_SPAWNS)
}

fn planned_max_level(reward: f32) -> i32 {
    trunc_f32_to_i32(1.0 + reward).max(1)
}
