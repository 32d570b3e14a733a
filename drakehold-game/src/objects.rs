//! Dungeon occupants: traps, loot, and decorations reacting to visits.
//!
//! A room owns at most one object. Objects react to two visit events
//! (entering the room, reaching its center) plus an end-of-day tick, and
//! report their fate explicitly so the owner removes them outside of any
//! iteration.

use serde::{Deserialize, Serialize};

use crate::adventurer::Adventurer;
use crate::constants::{
    BODY_FEAR, DECAY_DAYS, FIRE_BODY_FEAR, FIRE_DAMAGE, FIRE_DEATH_DECEPTION,
    FIRE_DEATH_RISK_PER_LEVEL, LOOT_FEAR, LOOT_GRANT, SPIKE_BODY_FEAR, SPIKE_DAMAGE,
    SPIKE_DEATH_RISK_PER_LEVEL,
};
use crate::economy::{EconomyState, OutcomeRecord};
use crate::effects::EffectPool;
use crate::geometry::Vec2;
use crate::rng::RngStreams;

/// Placement selector for build actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    SpikeTrap,
    FireTrap,
    Loot,
    Body,
    Slime,
}

impl ObjectKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpikeTrap => "spike_trap",
            Self::FireTrap => "fire_trap",
            Self::Loot => "loot",
            Self::Body => "body",
            Self::Slime => "slime",
        }
    }

    /// Single-character marker used on the text map.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::SpikeTrap => "^",
            Self::FireTrap => ">",
            Self::Loot => "%",
            Self::Body => "@",
            Self::Slime => "&",
        }
    }
}

/// What a room occupant should become after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFate {
    Keep,
    Remove,
}

/// Shared mutable context threaded through visit dispatches.
pub struct VisitCtx<'a> {
    pub outcomes: &'a mut Vec<OutcomeRecord>,
    pub effects: &'a mut EffectPool,
    pub rng: &'a RngStreams,
}

/// A room's occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DungeonObject {
    /// Rearming floor trap; a kill leaves a corpse that is recovered into
    /// the placable-bodies pool overnight.
    SpikeTrap { active: bool, body: bool },
    /// Heavier trap with a particle burst; its corpses burn away overnight.
    FireTrap { active: bool, body: bool },
    /// One-shot gold pile.
    Loot,
    /// Placed corpse decoration, decaying over several days.
    Body { decay: u8 },
    /// Slime coating that doubles later damage and fear.
    Slime { decay: u8 },
}

impl DungeonObject {
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::SpikeTrap => Self::SpikeTrap {
                active: true,
                body: false,
            },
            ObjectKind::FireTrap => Self::FireTrap {
                active: true,
                body: false,
            },
            ObjectKind::Loot => Self::Loot,
            ObjectKind::Body => Self::Body { decay: DECAY_DAYS },
            ObjectKind::Slime => Self::Slime { decay: DECAY_DAYS },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::SpikeTrap { .. } => ObjectKind::SpikeTrap,
            Self::FireTrap { .. } => ObjectKind::FireTrap,
            Self::Loot => ObjectKind::Loot,
            Self::Body { .. } => ObjectKind::Body,
            Self::Slime { .. } => ObjectKind::Slime,
        }
    }

    /// Whether a trap is armed. Non-traps are never armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(
            self,
            Self::SpikeTrap { active: true, .. } | Self::FireTrap { active: true, .. }
        )
    }

    /// Whether a trap currently holds an unrecovered corpse.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(
            self,
            Self::SpikeTrap { body: true, .. } | Self::FireTrap { body: true, .. }
        )
    }

    /// Remaining decay days for decorations.
    #[must_use]
    pub const fn decay_left(&self) -> Option<u8> {
        match self {
            Self::Body { decay } | Self::Slime { decay } => Some(*decay),
            _ => None,
        }
    }

    /// First entry of an adventurer into the room (within door range, before
    /// reaching the center).
    pub fn on_entered_room(&mut self, raider: &mut Adventurer, ctx: &mut VisitCtx<'_>) {
        match self {
            Self::SpikeTrap { body: true, .. } => {
                raider.add_fear(SPIKE_BODY_FEAR);
                ctx.effects.scare(raider.position());
            }
            Self::FireTrap { body: true, .. } => {
                raider.add_fear(FIRE_BODY_FEAR);
                ctx.effects.scare(raider.position());
            }
            Self::Body { .. } => {
                raider.add_fear(BODY_FEAR);
                ctx.effects.scare(raider.position());
            }
            Self::Slime { .. } => {
                raider.apply_slime();
                ctx.effects.scare(raider.position());
            }
            _ => {}
        }
    }

    /// First arrival of an adventurer at the room center.
    pub fn on_center_room(
        &mut self,
        raider: &mut Adventurer,
        room_center: Vec2,
        ctx: &mut VisitCtx<'_>,
    ) -> ObjectFate {
        match self {
            Self::SpikeTrap { active, body } if *active => {
                *active = false;
                if raider.take_damage(SPIKE_DAMAGE) {
                    *body = true;
                    ctx.outcomes.push(OutcomeRecord::death(
                        raider.level,
                        raider.loot(),
                        SPIKE_DEATH_RISK_PER_LEVEL,
                        0.0,
                    ));
                }
                ObjectFate::Keep
            }
            Self::FireTrap { active, body } if *active => {
                *active = false;
                ctx.effects.fire_burst(room_center, ctx.rng);
                if raider.take_damage(FIRE_DAMAGE) {
                    *body = true;
                    ctx.outcomes.push(OutcomeRecord::death(
                        raider.level,
                        raider.loot(),
                        FIRE_DEATH_RISK_PER_LEVEL,
                        FIRE_DEATH_DECEPTION,
                    ));
                }
                ObjectFate::Keep
            }
            Self::Loot => {
                raider.grant_loot(LOOT_GRANT);
                raider.add_fear(LOOT_FEAR);
                ObjectFate::Remove
            }
            _ => ObjectFate::Keep,
        }
    }

    /// Overnight tick: traps rearm and shed corpses, decorations decay.
    pub fn on_end_of_day(&mut self, economy: &mut EconomyState) -> ObjectFate {
        match self {
            Self::SpikeTrap { active, body } => {
                *active = true;
                if *body {
                    economy.placable_bodies += 1;
                    *body = false;
                }
                ObjectFate::Keep
            }
            Self::FireTrap { active, body } => {
                *active = true;
                *body = false;
                ObjectFate::Keep
            }
            Self::Loot => ObjectFate::Keep,
            Self::Body { decay } | Self::Slime { decay } => {
                *decay = decay.saturating_sub(1);
                if *decay == 0 {
                    ObjectFate::Remove
                } else {
                    ObjectFate::Keep
                }
            }
        }
    }
}
