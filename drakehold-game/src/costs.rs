//! Placement cost table.
//!
//! Defaults reproduce the stock balance; hosts may override individual
//! entries from JSON.

use serde::{Deserialize, Serialize};

use crate::constants::{DIG_COST, FIRE_TRAP_COST, LOOT_COST, SLIME_COST, SPIKE_TRAP_COST};
use crate::objects::ObjectKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    #[serde(default = "default_dig")]
    pub dig: i32,
    #[serde(default = "default_spike_trap")]
    pub spike_trap: i32,
    #[serde(default = "default_loot")]
    pub loot: i32,
    #[serde(default = "default_fire_trap")]
    pub fire_trap: i32,
    #[serde(default = "default_slime")]
    pub slime: i32,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            dig: default_dig(),
            spike_trap: default_spike_trap(),
            loot: default_loot(),
            fire_trap: default_fire_trap(),
            slime: default_slime(),
        }
    }
}

impl CostTable {
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Parse a cost table from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Money charged to place an object. Recovered bodies cost no money;
    /// they consume the placable-bodies counter instead.
    #[must_use]
    pub const fn placement_cost(&self, kind: ObjectKind) -> i32 {
        match kind {
            ObjectKind::SpikeTrap => self.spike_trap,
            ObjectKind::FireTrap => self.fire_trap,
            ObjectKind::Loot => self.loot,
            ObjectKind::Slime => self.slime,
            ObjectKind::Body => 0,
        }
    }

    /// Sell-back price of a placed object. Slimes and bodies resell at
    /// nothing and therefore cannot be sold.
    #[must_use]
    pub const fn sell_value(&self, kind: ObjectKind) -> i32 {
        match kind {
            ObjectKind::SpikeTrap => self.spike_trap,
            ObjectKind::FireTrap => self.fire_trap,
            ObjectKind::Loot => self.loot,
            ObjectKind::Slime | ObjectKind::Body => 0,
        }
    }
}

fn default_dig() -> i32 {
    DIG_COST
}

fn default_spike_trap() -> i32 {
    SPIKE_TRAP_COST
}

fn default_loot() -> i32 {
    LOOT_COST
}

fn default_fire_trap() -> i32 {
    FIRE_TRAP_COST
}

fn default_slime() -> i32 {
    SLIME_COST
}
