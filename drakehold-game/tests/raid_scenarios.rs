use drakehold_game::{
    Adventurer, AdventurerFate, DayReport, DungeonSim, EffectPool, ObjectKind, OutcomeKind,
    OutcomeRecord, RngStreams, RoomCoord, RoomGrid, VisitCtx,
};

const TICK_CAP: u32 = 1_000_000;

fn drive_to_completion(
    raider: &mut Adventurer,
    grid: &mut RoomGrid,
    outcomes: &mut Vec<OutcomeRecord>,
    effects: &mut EffectPool,
    rng: &RngStreams,
) -> u32 {
    for tick in 0..TICK_CAP {
        let mut ctx = VisitCtx {
            outcomes: &mut *outcomes,
            effects: &mut *effects,
            rng,
        };
        if raider.tick(grid, &mut ctx) == AdventurerFate::Done {
            return tick;
        }
    }
    panic!("adventurer did not terminate");
}

fn run_day(sim: &mut DungeonSim) -> DayReport {
    sim.start_day().unwrap();
    for _ in 0..TICK_CAP {
        if let Some(report) = sim.fixed_update() {
            return report;
        }
    }
    panic!("day did not settle");
}

#[test]
fn lone_visitor_in_bare_dungeon_escapes() {
    let mut grid = RoomGrid::new();
    let mut raider = Adventurer::spawn(1, &grid);
    let mut outcomes = Vec::new();
    let mut effects = EffectPool::new();
    let rng = RngStreams::from_seed(1);

    drive_to_completion(&mut raider, &mut grid, &mut outcomes, &mut effects, &rng);

    assert_eq!(outcomes.len(), 1);
    let record = &outcomes[0];
    assert_eq!(record.kind, OutcomeKind::Escaped);
    assert_eq!(record.money, 0);
    assert!((record.reward - 0.0).abs() < f32::EPSILON);
    // Level 1 leaves with courage 2 intact: deception drops by 2.2.
    assert!((record.deception - (-2.2)).abs() < 1e-6);
}

#[test]
fn weak_visitor_dies_on_an_armed_spike_trap() {
    let mut grid = RoomGrid::new();
    let origin = RoomCoord::new(0, 0);
    grid.room_mut(origin).unwrap().object =
        Some(drakehold_game::DungeonObject::new(ObjectKind::SpikeTrap));
    let mut raider = Adventurer::spawn(1, &grid);
    let mut outcomes = Vec::new();
    let mut effects = EffectPool::new();
    let rng = RngStreams::from_seed(2);

    drive_to_completion(&mut raider, &mut grid, &mut outcomes, &mut effects, &rng);

    assert_eq!(outcomes.len(), 1);
    let record = &outcomes[0];
    assert_eq!(record.kind, OutcomeKind::Death);
    assert_eq!(record.money, 50);
    assert!((record.risk - 1.5).abs() < f32::EPSILON);
    assert!((record.deception - 0.0).abs() < f32::EPSILON);

    let trap = grid.room(origin).unwrap().object.as_ref().unwrap();
    assert!(trap.has_body());
    assert!(!trap.is_armed());
}

#[test]
fn slimed_visitor_cannot_survive_a_fire_trap() {
    let mut grid = RoomGrid::new();
    grid.build(RoomCoord::new(1, 0));
    grid.build(RoomCoord::new(2, 0));
    grid.room_mut(RoomCoord::new(1, 0)).unwrap().object =
        Some(drakehold_game::DungeonObject::new(ObjectKind::Slime));
    grid.room_mut(RoomCoord::new(2, 0)).unwrap().object =
        Some(drakehold_game::DungeonObject::new(ObjectKind::FireTrap));

    let mut raider = Adventurer::spawn(5, &grid);
    let mut outcomes = Vec::new();
    let mut effects = EffectPool::new();
    let rng = RngStreams::from_seed(3);

    drive_to_completion(&mut raider, &mut grid, &mut outcomes, &mut effects, &rng);

    // The slime coat doubles fire damage to 8, lethal for any hp <= 8.
    assert_eq!(outcomes.len(), 1);
    let record = &outcomes[0];
    assert_eq!(record.kind, OutcomeKind::Death);
    assert_eq!(record.money, 20 + 5 * 30);
    assert!((record.risk - 12.5).abs() < f32::EPSILON);
    assert!((record.deception - 1.0).abs() < f32::EPSILON);
    assert!(effects.len() >= 100, "trap burst spawns a particle spread");
}

#[test]
fn corridor_day_pays_death_bounty_and_tribute() {
    // Entrance -> spike trap -> loot pile. Day one spawns two level-1
    // visitors: the first dies on the trap, the second loots the gold,
    // panics, and flees.
    let mut sim = DungeonSim::new(1);
    sim.economy_mut().money = 200;
    sim.dig(RoomCoord::new(1, 0)).unwrap();
    sim.dig(RoomCoord::new(2, 0)).unwrap();
    sim.place(RoomCoord::new(1, 0), ObjectKind::SpikeTrap).unwrap();
    sim.place(RoomCoord::new(2, 0), ObjectKind::Loot).unwrap();
    assert_eq!(sim.economy().money, 50);

    let report = run_day(&mut sim);

    assert_eq!(report.lines.len(), 2);
    let kinds: Vec<OutcomeKind> = report.lines.iter().map(|line| line.kind).collect();
    assert!(kinds.contains(&OutcomeKind::Death));
    assert!(kinds.contains(&OutcomeKind::Fled));

    let economy = sim.economy();
    assert_eq!(economy.placable_bodies, 1, "spike corpse recovered overnight");
    assert!((economy.risk - 1.5).abs() < 1e-5);
    assert!((economy.reward - 1.25).abs() < 1e-5);
    assert!((economy.deception - 2.2).abs() < 1e-5);
    assert_eq!(report.tribute, 2);
    // 50 left after building, +50 death bounty, +2 tribute.
    assert_eq!(economy.money, 102);

    // The loot pile was a single pickup; the trap survived and rearmed.
    assert!(sim.grid().room(RoomCoord::new(2, 0)).unwrap().object.is_none());
    let trap = sim
        .grid()
        .room(RoomCoord::new(1, 0))
        .unwrap()
        .object
        .as_ref()
        .unwrap();
    assert!(trap.is_armed());
}

#[test]
fn every_day_records_exactly_one_outcome_per_spawn() {
    let mut sim = DungeonSim::new(31_337);
    sim.economy_mut().money = 500;
    sim.dig(RoomCoord::new(1, 0)).unwrap();
    sim.dig(RoomCoord::new(1, 1)).unwrap();
    sim.place(RoomCoord::new(1, 0), ObjectKind::SpikeTrap).unwrap();

    let mut total_lines = 0;
    for _ in 0..5 {
        let report = run_day(&mut sim);
        assert!(report.lines.len() >= 2);
        total_lines += report.lines.len();
        assert!(sim.economy().risk >= 0.0);
        assert!(sim.economy().reward >= 0.0);
        assert!(sim.economy().deception >= 0.0);
    }
    let spawned = sim
        .logs()
        .iter()
        .filter(|entry| entry.starts_with("log.wave.spawn"))
        .count();
    assert_eq!(total_lines, spawned);
}
