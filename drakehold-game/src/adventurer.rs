//! Adventurer agents exploring the dungeon.
//!
//! Each agent walks the room graph one target at a time: approach the target
//! center, dispatch visit events on first contact, then either explore a
//! random unvisited neighbor or backtrack. Once courage runs out the agent
//! flees permanently, retracing its backtrack stack at speed toward the
//! exit. Every agent produces exactly one outcome record over its lifetime.

use rand::Rng;
use smallvec::SmallVec;
use std::collections::HashSet;

use crate::constants::{
    ARRIVAL_RADIUS, EXIT_BOUNDARY_X, EXIT_WALK_SPEED, FLEE_SPEED_FACTOR, ROOM_ENTER_RADIUS,
    SPAWN_POSITION_X, WALK_SPEED,
};
use crate::economy::OutcomeRecord;
use crate::geometry::Vec2;
use crate::grid::{Direction, RoomCoord, RoomGrid};
use crate::objects::{ObjectFate, VisitCtx};

/// Whether an agent survives the tick or leaves the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdventurerFate {
    Active,
    Done,
}

/// One autonomous dungeon visitor.
#[derive(Debug)]
pub struct Adventurer {
    pub level: i32,
    hp: i32,
    courage: i32,
    loot: i32,
    slimed: bool,
    fleeing: bool,
    in_room: bool,
    position: Vec2,
    target: Option<RoomCoord>,
    visited: HashSet<RoomCoord>,
    backtrack: Vec<RoomCoord>,
}

impl Adventurer {
    /// Spawn an agent of the given level outside the entrance, headed for
    /// the origin room. Hit points equal the level; courage is one higher.
    #[must_use]
    pub fn spawn(level: i32, grid: &RoomGrid) -> Self {
        Self {
            level,
            hp: level,
            courage: level + 1,
            loot: 0,
            slimed: false,
            fleeing: false,
            in_room: false,
            position: Vec2::new(SPAWN_POSITION_X, 0.0),
            target: grid.room_at(Vec2::default(), false),
            visited: HashSet::new(),
            backtrack: Vec::new(),
        }
    }

    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub const fn courage(&self) -> i32 {
        self.courage
    }

    #[must_use]
    pub const fn loot(&self) -> i32 {
        self.loot
    }

    #[must_use]
    pub const fn is_slimed(&self) -> bool {
        self.slimed
    }

    #[must_use]
    pub const fn is_fleeing(&self) -> bool {
        self.fleeing
    }

    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub const fn target(&self) -> Option<RoomCoord> {
        self.target
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Apply damage, doubled while slimed. Returns whether the hit was
    /// lethal.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        if self.slimed {
            self.hp -= amount;
        }
        self.hp <= 0
    }

    /// Apply fear, doubled while slimed. Courage at or below zero flips the
    /// agent into permanent flight; returns the fleeing state.
    pub fn add_fear(&mut self, amount: i32) -> bool {
        self.courage -= amount;
        if self.slimed {
            self.courage -= amount;
        }
        if self.courage <= 0 {
            self.fleeing = true;
        }
        self.fleeing
    }

    pub fn apply_slime(&mut self) {
        self.slimed = true;
    }

    pub fn grant_loot(&mut self, amount: i32) {
        self.loot += amount;
    }

    /// Advance one simulation tick.
    pub fn tick(&mut self, grid: &mut RoomGrid, ctx: &mut VisitCtx<'_>) -> AdventurerFate {
        if let Some(target) = self.target {
            if target.center().distance_to(self.position) < ARRIVAL_RADIUS {
                self.at_center(target, grid, ctx);
            } else {
                self.approach(target, grid, ctx);
            }
        } else {
            self.position.x -= EXIT_WALK_SPEED;
            if self.position.x < EXIT_BOUNDARY_X {
                let record = if self.fleeing {
                    OutcomeRecord::fled(self.level, self.loot, self.courage)
                } else {
                    OutcomeRecord::escaped(self.level, self.loot, self.courage)
                };
                ctx.outcomes.push(record);
                return AdventurerFate::Done;
            }
        }
        if self.hp < 1 {
            // Lethal hits already recorded their outcome at the trap.
            return AdventurerFate::Done;
        }
        AdventurerFate::Active
    }

    /// Arrived at the target center: dispatch first-visit events, then pick
    /// the next target.
    fn at_center(&mut self, current: RoomCoord, grid: &mut RoomGrid, ctx: &mut VisitCtx<'_>) {
        if !self.visited.contains(&current) {
            self.dispatch_center(current, grid, ctx);
            self.visited.insert(current);
        }

        let mut options: SmallVec<[RoomCoord; 4]> = SmallVec::new();
        for direction in Direction::ALL {
            let neighbor = current.step(direction);
            if grid.room(neighbor).is_some_and(|room| room.built)
                && !self.visited.contains(&neighbor)
            {
                options.push(neighbor);
            }
        }

        if !self.fleeing && !options.is_empty() {
            let index = ctx.rng.rooms().random_range(0..options.len());
            self.backtrack.push(current);
            self.target = Some(options[index]);
            self.in_room = false;
        } else if let Some(back) = self.backtrack.pop() {
            self.target = Some(back);
            self.in_room = false;
        } else {
            self.target = None;
        }
    }

    /// Walking toward the target: dispatch entered-room events on first
    /// contact; fleeing agents immediately divert to their backtrack stack.
    fn approach(&mut self, target: RoomCoord, grid: &mut RoomGrid, ctx: &mut VisitCtx<'_>) {
        let mut speed = WALK_SPEED;
        if self.fleeing {
            speed *= FLEE_SPEED_FACTOR;
        }
        let step = (target.center() - self.position).normalized() * speed;
        self.position += step;

        if !self.in_room && target.center().distance_to(self.position) < ROOM_ENTER_RADIUS {
            self.in_room = true;
            if !self.visited.contains(&target) {
                self.dispatch_entered(target, grid, ctx);
                if self.fleeing {
                    // Divert to the backtrack top without exploring; the room
                    // stays unvisited.
                    if let Some(back) = self.backtrack.pop() {
                        self.target = Some(back);
                    }
                    self.in_room = false;
                }
            }
        }
    }

    fn dispatch_center(&mut self, coord: RoomCoord, grid: &mut RoomGrid, ctx: &mut VisitCtx<'_>) {
        let center = coord.center();
        if let Some(room) = grid.room_mut(coord)
            && let Some(object) = room.object.as_mut()
            && object.on_center_room(self, center, ctx) == ObjectFate::Remove
        {
            room.object = None;
        }
    }

    fn dispatch_entered(&mut self, coord: RoomCoord, grid: &mut RoomGrid, ctx: &mut VisitCtx<'_>) {
        if let Some(room) = grid.room_mut(coord)
            && let Some(object) = room.object.as_mut()
        {
            object.on_entered_room(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::OutcomeKind;
    use crate::effects::EffectPool;
    use crate::objects::{DungeonObject, ObjectKind};
    use crate::rng::RngStreams;

    struct Harness {
        outcomes: Vec<OutcomeRecord>,
        effects: EffectPool,
        rng: RngStreams,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                outcomes: Vec::new(),
                effects: EffectPool::new(),
                rng: RngStreams::from_seed(11),
            }
        }

        fn run(
            &mut self,
            raider: &mut Adventurer,
            grid: &mut RoomGrid,
            max_ticks: u32,
        ) -> Option<u32> {
            for tick in 0..max_ticks {
                let mut ctx = VisitCtx {
                    outcomes: &mut self.outcomes,
                    effects: &mut self.effects,
                    rng: &self.rng,
                };
                if raider.tick(grid, &mut ctx) == AdventurerFate::Done {
                    return Some(tick);
                }
            }
            None
        }
    }

    #[test]
    fn damage_and_fear_double_while_slimed() {
        let grid = RoomGrid::new();
        let mut raider = Adventurer::spawn(5, &grid);
        assert!(!raider.take_damage(1));
        assert_eq!(raider.hp(), 4);
        raider.apply_slime();
        assert!(!raider.take_damage(1));
        assert_eq!(raider.hp(), 2);

        assert!(!raider.add_fear(1));
        assert_eq!(raider.courage(), 4);
        assert!(raider.add_fear(2));
        assert!(raider.is_fleeing());
        // Fleeing is permanent even if courage were to recover.
        assert!(raider.add_fear(0));
    }

    #[test]
    fn lone_room_visitor_escapes_with_negative_deception() {
        let mut grid = RoomGrid::new();
        let mut raider = Adventurer::spawn(1, &grid);
        let mut harness = Harness::new();
        let ticks = harness.run(&mut raider, &mut grid, 10_000);
        assert!(ticks.is_some(), "agent must terminate");
        assert_eq!(harness.outcomes.len(), 1);
        let record = &harness.outcomes[0];
        assert_eq!(record.kind, OutcomeKind::Escaped);
        assert_eq!(record.money, 0);
        assert!((record.reward - 0.0).abs() < f32::EPSILON);
        assert!((record.deception - (-2.2)).abs() < 1e-6);
    }

    #[test]
    fn spike_trap_kills_weak_visitor_and_leaves_corpse() {
        let mut grid = RoomGrid::new();
        let origin = RoomCoord::new(0, 0);
        grid.room_mut(origin).unwrap().object = Some(DungeonObject::new(ObjectKind::SpikeTrap));
        let mut raider = Adventurer::spawn(1, &grid);
        let mut harness = Harness::new();
        assert!(harness.run(&mut raider, &mut grid, 10_000).is_some());
        assert_eq!(harness.outcomes.len(), 1);
        let record = &harness.outcomes[0];
        assert_eq!(record.kind, OutcomeKind::Death);
        assert_eq!(record.money, 50);
        assert!((record.risk - 1.5).abs() < f32::EPSILON);
        assert!(grid.room(origin).unwrap().object.as_ref().unwrap().has_body());
    }

    #[test]
    fn exploration_visits_every_connected_room() {
        let mut grid = RoomGrid::new();
        for coord in [
            RoomCoord::new(1, 0),
            RoomCoord::new(2, 0),
            RoomCoord::new(1, 1),
        ] {
            grid.build(coord);
        }
        let mut raider = Adventurer::spawn(9, &grid);
        let mut harness = Harness::new();
        assert!(harness.run(&mut raider, &mut grid, 100_000).is_some());
        assert_eq!(raider.visited_count(), 4);
        assert_eq!(harness.outcomes.len(), 1);
        assert_eq!(harness.outcomes[0].kind, OutcomeKind::Escaped);
    }

    #[test]
    fn missing_entrance_sends_agent_straight_out() {
        let mut grid = RoomGrid::new();
        // No reachable room: the agent heads straight for the exit.
        let mut raider = Adventurer {
            target: None,
            ..Adventurer::spawn(1, &grid)
        };
        let mut harness = Harness::new();
        let ticks = harness.run(&mut raider, &mut grid, 1_000);
        assert!(ticks.is_some());
        assert_eq!(harness.outcomes[0].kind, OutcomeKind::Escaped);
    }
}
