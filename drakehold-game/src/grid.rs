//! Sparse dungeon grid addressed by integer room coordinates.
//!
//! Rooms sit on a 4×6 unit lattice. Lookup by world position rounds to the
//! nearest lattice point and accepts it only within the lookup tolerance,
//! which stays below half the minimum spacing so a position can never match
//! two rooms.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{
    ENTRANCE_BOUNDARY_X, ROOM_LOOKUP_TOLERANCE, ROOM_SPACING_X, ROOM_SPACING_Y,
};
use crate::geometry::Vec2;
use crate::numbers::trunc_f64_to_i32;
use crate::objects::DungeonObject;

/// Lattice coordinate of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCoord {
    pub x: i32,
    pub y: i32,
}

impl RoomCoord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World position of the room center.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            f64::from(self.x) * ROOM_SPACING_X,
            f64::from(self.y) * ROOM_SPACING_Y,
        )
    }

    /// Nearest lattice coordinate to a world position.
    #[must_use]
    pub fn nearest(position: Vec2) -> Self {
        Self::new(
            trunc_f64_to_i32((position.x / ROOM_SPACING_X).round()),
            trunc_f64_to_i32((position.y / ROOM_SPACING_Y).round()),
        )
    }

    /// Adjacent coordinate one step in the given direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y + 1),
            Direction::Down => Self::new(self.x, self.y - 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

/// Cardinal neighbor directions, in the order rooms probe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];
}

/// A single cell of the dungeon: dug out or not, holding at most one object.
#[derive(Debug)]
pub struct Room {
    pub coord: RoomCoord,
    pub built: bool,
    pub entrance: bool,
    pub object: Option<DungeonObject>,
}

impl Room {
    fn unbuilt(coord: RoomCoord) -> Self {
        Self {
            coord,
            built: false,
            entrance: false,
            object: None,
        }
    }
}

/// Door state of a room, derived purely from neighbor build flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Connectivity {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Connectivity {
    /// The room's 7×7 character tile, one entry per text row.
    #[must_use]
    pub const fn ascii_tile(self) -> [&'static str; 7] {
        let (top_a, top_b) = if self.up {
            ("  | |  ", " +- -+ ")
        } else {
            ("       ", " +---+ ")
        };
        let (mid_a, mid_b, mid_c) = match (self.left, self.right) {
            (true, true) => ("-|   |-", "       ", "-|   |-"),
            (true, false) => ("-|   | ", "     | ", "-|   | "),
            (false, true) => (" |   |-", " |     ", " |   |-"),
            (false, false) => (" |   | ", " |   | ", " |   | "),
        };
        let (bot_a, bot_b) = if self.down {
            (" +- -+ ", "  | |  ")
        } else {
            (" +---+ ", "       ")
        };
        [top_a, top_b, mid_a, mid_b, mid_c, bot_a, bot_b]
    }
}

/// The dungeon's room graph.
///
/// Created with a built entrance at the origin; unbuilt frontier rooms are
/// instantiated lazily whenever an adjacent room is dug out, except to the
/// left of the origin boundary.
#[derive(Debug)]
pub struct RoomGrid {
    rooms: HashMap<RoomCoord, Room>,
}

impl RoomGrid {
    #[must_use]
    pub fn new() -> Self {
        let mut grid = Self {
            rooms: HashMap::new(),
        };
        let origin = RoomCoord::new(0, 0);
        let mut entrance = Room::unbuilt(origin);
        entrance.entrance = true;
        grid.rooms.insert(origin, entrance);
        grid.build(origin);
        grid
    }

    #[must_use]
    pub fn room(&self, coord: RoomCoord) -> Option<&Room> {
        self.rooms.get(&coord)
    }

    #[must_use]
    pub fn room_mut(&mut self, coord: RoomCoord) -> Option<&mut Room> {
        self.rooms.get_mut(&coord)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn rooms_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.rooms.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Room whose center lies within the lookup tolerance of `position`.
    ///
    /// Unbuilt frontier rooms are only visible with `include_unbuilt`.
    #[must_use]
    pub fn room_at(&self, position: Vec2, include_unbuilt: bool) -> Option<RoomCoord> {
        let coord = RoomCoord::nearest(position);
        let room = self.rooms.get(&coord)?;
        if !room.built && !include_unbuilt {
            return None;
        }
        (coord.center().distance_to(position) < ROOM_LOOKUP_TOLERANCE).then_some(coord)
    }

    /// Dig out a room. No-op on missing or already-built rooms.
    ///
    /// Marks the room built and instantiates any missing neighbor slots,
    /// except leftward when the room sits on the origin boundary. Returns
    /// whether the room changed state.
    pub fn build(&mut self, coord: RoomCoord) -> bool {
        let Some(room) = self.rooms.get_mut(&coord) else {
            return false;
        };
        if room.built {
            return false;
        }
        room.built = true;
        for direction in Direction::ALL {
            let neighbor = coord.step(direction);
            if self.rooms.contains_key(&neighbor) {
                continue;
            }
            if direction == Direction::Left && coord.center().x <= ENTRANCE_BOUNDARY_X {
                continue;
            }
            self.rooms.insert(neighbor, Room::unbuilt(neighbor));
        }
        true
    }

    /// Door state for a room, recomputable at any time from build flags.
    /// The entrance always has its left door open.
    #[must_use]
    pub fn connectivity(&self, coord: RoomCoord) -> Connectivity {
        let Some(room) = self.rooms.get(&coord) else {
            return Connectivity::default();
        };
        let built = |c: RoomCoord| self.rooms.get(&c).is_some_and(|r| r.built);
        let mut doors = Connectivity {
            up: room.built && built(coord.step(Direction::Up)),
            down: room.built && built(coord.step(Direction::Down)),
            left: room.built && built(coord.step(Direction::Left)),
            right: room.built && built(coord.step(Direction::Right)),
        };
        if room.entrance {
            doors.left = true;
        }
        doors
    }

    /// Text rendering of the whole grid for headless hosts.
    #[must_use]
    pub fn ascii_map(&self) -> String {
        let Some(first) = self.rooms.keys().next() else {
            return String::new();
        };
        let mut min = *first;
        let mut max = *first;
        for coord in self.rooms.keys() {
            min.x = min.x.min(coord.x);
            min.y = min.y.min(coord.y);
            max.x = max.x.max(coord.x);
            max.y = max.y.max(coord.y);
        }

        let mut out = String::new();
        for y in (min.y..=max.y).rev() {
            for line in 0..7 {
                let mut row = String::new();
                for x in min.x..=max.x {
                    let cell = self.render_cell(RoomCoord::new(x, y), line);
                    if !row.is_empty() {
                        row.push(' ');
                    }
                    row.push_str(&cell);
                }
                out.push_str(row.trim_end());
                out.push('\n');
            }
        }
        out
    }

    fn render_cell(&self, coord: RoomCoord, line: usize) -> String {
        match self.rooms.get(&coord) {
            None => "       ".to_string(),
            Some(room) if !room.built => {
                if line == 3 {
                    "   .   ".to_string()
                } else {
                    "       ".to_string()
                }
            }
            Some(room) => {
                let mut text = self.connectivity(coord).ascii_tile()[line].to_string();
                if line == 3
                    && let Some(object) = &room.object
                {
                    text.replace_range(3..4, object.kind().glyph());
                }
                text
            }
        }
    }
}

impl Default for RoomGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrance_bootstrap_creates_frontier() {
        let grid = RoomGrid::new();
        let entrance = grid.room(RoomCoord::new(0, 0)).unwrap();
        assert!(entrance.built);
        assert!(entrance.entrance);
        // Right, up, and down slots exist unbuilt; left is blocked at the boundary.
        for coord in [
            RoomCoord::new(1, 0),
            RoomCoord::new(0, 1),
            RoomCoord::new(0, -1),
        ] {
            assert!(!grid.room(coord).unwrap().built);
        }
        assert!(grid.room(RoomCoord::new(-1, 0)).is_none());
    }

    #[test]
    fn build_is_idempotent_and_expands() {
        let mut grid = RoomGrid::new();
        assert!(grid.build(RoomCoord::new(1, 0)));
        assert!(!grid.build(RoomCoord::new(1, 0)));
        // Building away from the boundary creates all four neighbors.
        for coord in [
            RoomCoord::new(2, 0),
            RoomCoord::new(1, 1),
            RoomCoord::new(1, -1),
        ] {
            assert!(grid.room(coord).is_some());
        }
        // Building a missing slot is a no-op.
        assert!(!grid.build(RoomCoord::new(9, 9)));
    }

    #[test]
    fn lookup_respects_tolerance_and_build_flag() {
        let grid = RoomGrid::new();
        assert_eq!(
            grid.room_at(Vec2::new(0.0, 0.0), false),
            Some(RoomCoord::new(0, 0))
        );
        assert_eq!(
            grid.room_at(Vec2::new(1.9, 0.0), false),
            Some(RoomCoord::new(0, 0))
        );
        // 2.1 rounds to the unbuilt slot at (1, 0).
        assert_eq!(grid.room_at(Vec2::new(2.1, 0.0), false), None);
        assert_eq!(
            grid.room_at(Vec2::new(2.1, 0.0), true),
            Some(RoomCoord::new(1, 0))
        );
        // Exactly on the tolerance boundary matches nothing.
        assert_eq!(grid.room_at(Vec2::new(2.0, 0.0), false), None);
    }

    #[test]
    fn tolerance_stays_below_half_spacing() {
        assert!(ROOM_LOOKUP_TOLERANCE < ROOM_SPACING_X / 2.0);
    }

    #[test]
    fn connectivity_is_pure_and_rerenderable() {
        let mut grid = RoomGrid::new();
        grid.build(RoomCoord::new(1, 0));
        let doors = grid.connectivity(RoomCoord::new(0, 0));
        assert!(doors.right);
        assert!(doors.left, "entrance keeps its left door open");
        assert!(!doors.up);
        let again = grid.connectivity(RoomCoord::new(0, 0));
        assert_eq!(doors, again);
        assert_eq!(doors.ascii_tile(), again.ascii_tile());
    }

    #[test]
    fn unbuilt_rooms_show_no_doors() {
        let grid = RoomGrid::new();
        let doors = grid.connectivity(RoomCoord::new(1, 0));
        assert_eq!(doors, Connectivity::default());
    }

    #[test]
    fn tile_art_matches_door_layout() {
        let open = Connectivity {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        let tile = open.ascii_tile();
        assert_eq!(tile[0], "  | |  ");
        assert_eq!(tile[2], "-|   |-");
        assert_eq!(tile[6], "  | |  ");
        let closed = Connectivity::default().ascii_tile();
        assert_eq!(closed[1], " +---+ ");
        assert_eq!(closed[5], " +---+ ");
    }
}
