//! The dungeon simulation session.
//!
//! Owns the room grid, live adventurers, transient effects, the day's wave
//! manager, and the economy, and drives them from a single fixed-update
//! tick. Hosts call build actions between raids, `start_day` to launch a
//! wave, then `fixed_update` until it yields the settled day report.

use crate::adventurer::{Adventurer, AdventurerFate};
use crate::build::{ActionError, dig_room, place_object, sell_object};
use crate::constants::{LOG_DAY_END, LOG_DAY_START, LOG_RESULT_PREFIX, LOG_TRIBUTE, LOG_WAVE_SPAWN};
use crate::costs::CostTable;
use crate::economy::{DayReport, EconomyState, OutcomeRecord, settle_day};
use crate::effects::EffectPool;
use crate::grid::{RoomCoord, RoomGrid};
use crate::objects::{ObjectFate, ObjectKind, VisitCtx};
use crate::rng::RngStreams;
use crate::wave::WaveManager;

/// One complete dungeon-management game.
#[derive(Debug)]
pub struct DungeonSim {
    grid: RoomGrid,
    raiders: Vec<Adventurer>,
    effects: EffectPool,
    wave: Option<WaveManager>,
    economy: EconomyState,
    outcomes: Vec<OutcomeRecord>,
    costs: CostTable,
    rng: RngStreams,
    logs: Vec<String>,
    day: u32,
}

impl DungeonSim {
    /// New game with a built entrance at the origin and stock costs.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_costs(seed, CostTable::default_config())
    }

    #[must_use]
    pub fn with_costs(seed: u64, costs: CostTable) -> Self {
        Self {
            grid: RoomGrid::new(),
            raiders: Vec::new(),
            effects: EffectPool::new(),
            wave: None,
            economy: EconomyState::default(),
            outcomes: Vec::new(),
            costs,
            rng: RngStreams::from_seed(seed),
            logs: vec![String::from("log.booting")],
            day: 0,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &RoomGrid {
        &self.grid
    }

    #[must_use]
    pub fn economy(&self) -> &EconomyState {
        &self.economy
    }

    pub fn economy_mut(&mut self) -> &mut EconomyState {
        &mut self.economy
    }

    #[must_use]
    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    #[must_use]
    pub fn raiders(&self) -> &[Adventurer] {
        &self.raiders
    }

    #[must_use]
    pub fn effects(&self) -> &EffectPool {
        &self.effects
    }

    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Days fully settled so far.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub const fn is_raid_active(&self) -> bool {
        self.wave.is_some()
    }

    /// Dig out the room at `coord`.
    ///
    /// # Errors
    ///
    /// Rejects during raids and on any [`ActionError`] condition.
    pub fn dig(&mut self, coord: RoomCoord) -> Result<(), ActionError> {
        self.ensure_build_phase()?;
        dig_room(&mut self.grid, &mut self.economy, &self.costs, coord)
    }

    /// Place an object into the room at `coord`.
    ///
    /// # Errors
    ///
    /// Rejects during raids and on any [`ActionError`] condition.
    pub fn place(&mut self, coord: RoomCoord, kind: ObjectKind) -> Result<(), ActionError> {
        self.ensure_build_phase()?;
        place_object(&mut self.grid, &mut self.economy, &self.costs, coord, kind)
    }

    /// Sell the object in the room at `coord`, returning the refund.
    ///
    /// # Errors
    ///
    /// Rejects during raids and on any [`ActionError`] condition.
    pub fn sell(&mut self, coord: RoomCoord) -> Result<i32, ActionError> {
        self.ensure_build_phase()?;
        sell_object(&mut self.grid, &mut self.economy, &self.costs, coord)
    }

    /// Launch the next day's wave.
    ///
    /// # Errors
    ///
    /// Rejects when a raid is already underway.
    pub fn start_day(&mut self) -> Result<(), ActionError> {
        self.ensure_build_phase()?;
        self.wave = Some(WaveManager::new(&self.economy));
        self.logs.push(format!("{LOG_DAY_START}:{}", self.day + 1));
        Ok(())
    }

    /// Advance the simulation one tick.
    ///
    /// Returns the settled day report on the tick the wave completes.
    pub fn fixed_update(&mut self) -> Option<DayReport> {
        self.effects.tick();
        let wave = self.wave.as_mut()?;

        if let Some(level) = wave.tick(self.raiders.len(), &self.rng) {
            self.raiders.push(Adventurer::spawn(level, &self.grid));
            self.logs.push(format!("{LOG_WAVE_SPAWN}:{level}"));
        }

        let grid = &mut self.grid;
        let mut ctx = VisitCtx {
            outcomes: &mut self.outcomes,
            effects: &mut self.effects,
            rng: &self.rng,
        };
        self.raiders
            .retain_mut(|raider| raider.tick(grid, &mut ctx) == AdventurerFate::Active);

        if self.wave.as_ref().is_some_and(WaveManager::is_done) {
            return Some(self.finish_day());
        }
        None
    }

    /// Settle the completed day: overnight object ticks, then outcome
    /// aggregation, then return to the build phase.
    fn finish_day(&mut self) -> DayReport {
        for room in self.grid.rooms_mut() {
            if let Some(object) = room.object.as_mut()
                && object.on_end_of_day(&mut self.economy) == ObjectFate::Remove
            {
                room.object = None;
            }
        }

        self.day += 1;
        let report = settle_day(self.day, &mut self.economy, &mut self.outcomes);
        for line in &report.lines {
            self.logs
                .push(format!("{LOG_RESULT_PREFIX}{}", line.kind.as_str()));
        }
        self.logs.push(format!("{LOG_TRIBUTE}:{}", report.tribute));
        self.logs.push(format!("{LOG_DAY_END}:{}", self.day));
        self.wave = None;
        report
    }

    const fn ensure_build_phase(&self) -> Result<(), ActionError> {
        if self.wave.is_some() {
            return Err(ActionError::RaidInProgress);
        }
        Ok(())
    }
}
