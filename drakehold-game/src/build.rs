//! Player build actions between raids: dig rooms, place objects, sell back.
//!
//! Every action validates its target first and only then charges, so a
//! rejected action never mutates any state.

use thiserror::Error;

use crate::costs::CostTable;
use crate::economy::EconomyState;
use crate::grid::{RoomCoord, RoomGrid};
use crate::objects::{DungeonObject, ObjectKind};

/// Reasons a player action is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("not enough money (need {cost}, have {money})")]
    NotEnoughMoney { cost: i32, money: i32 },
    #[error("no room at the targeted cell")]
    NoSuchRoom,
    #[error("room is already dug out")]
    AlreadyBuilt,
    #[error("room must be dug out first")]
    NotBuilt,
    #[error("room already holds an object")]
    Occupied,
    #[error("nothing to sell in this room")]
    NothingToSell,
    #[error("object has no sell value")]
    Worthless,
    #[error("no recovered bodies available")]
    NoBodies,
    #[error("build actions are unavailable while a raid is underway")]
    RaidInProgress,
}

/// Dig out an undug room adjacent to the existing dungeon.
///
/// # Errors
///
/// Rejects missing or already-built targets and insufficient funds, without
/// mutating anything.
pub fn dig_room(
    grid: &mut RoomGrid,
    economy: &mut EconomyState,
    costs: &CostTable,
    coord: RoomCoord,
) -> Result<(), ActionError> {
    let room = grid.room(coord).ok_or(ActionError::NoSuchRoom)?;
    if room.built {
        return Err(ActionError::AlreadyBuilt);
    }
    charge(economy, costs.dig)?;
    grid.build(coord);
    Ok(())
}

/// Place an object into an empty, built room.
///
/// Bodies are free but consume one recovered body from the economy.
///
/// # Errors
///
/// Rejects missing, undug, or occupied rooms, insufficient funds, and body
/// placement without a recovered body; nothing is mutated on rejection.
pub fn place_object(
    grid: &mut RoomGrid,
    economy: &mut EconomyState,
    costs: &CostTable,
    coord: RoomCoord,
    kind: ObjectKind,
) -> Result<(), ActionError> {
    {
        let room = grid.room(coord).ok_or(ActionError::NoSuchRoom)?;
        if !room.built {
            return Err(ActionError::NotBuilt);
        }
        if room.object.is_some() {
            return Err(ActionError::Occupied);
        }
    }
    if kind == ObjectKind::Body {
        if economy.placable_bodies < 1 {
            return Err(ActionError::NoBodies);
        }
        economy.placable_bodies -= 1;
    } else {
        charge(economy, costs.placement_cost(kind))?;
    }
    if let Some(room) = grid.room_mut(coord) {
        room.object = Some(DungeonObject::new(kind));
    }
    Ok(())
}

/// Sell a room's object back for its sell value.
///
/// # Errors
///
/// Rejects missing rooms, empty rooms, and objects with no sell value.
pub fn sell_object(
    grid: &mut RoomGrid,
    economy: &mut EconomyState,
    costs: &CostTable,
    coord: RoomCoord,
) -> Result<i32, ActionError> {
    let room = grid.room_mut(coord).ok_or(ActionError::NoSuchRoom)?;
    let object = room.object.as_ref().ok_or(ActionError::NothingToSell)?;
    let value = costs.sell_value(object.kind());
    if value <= 0 {
        return Err(ActionError::Worthless);
    }
    room.object = None;
    economy.money += value;
    Ok(value)
}

fn charge(economy: &mut EconomyState, cost: i32) -> Result<(), ActionError> {
    if economy.money < cost {
        return Err(ActionError::NotEnoughMoney {
            cost,
            money: economy.money,
        });
    }
    economy.money -= cost;
    Ok(())
}
