//! Economy state, adventurer outcome records, and end-of-day settlement.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::constants::{
    DEATH_MONEY_BASE, DEATH_MONEY_PER_LEVEL, ESCAPED_LEVEL_FACTOR, FLED_DECEPTION_FACTOR,
    LOOT_REWARD_DIVISOR, STARTING_MONEY, STAT_DECAY, TAG_STRONG_THRESHOLD,
};
use crate::numbers::trunc_f32_to_i32;

/// Player-facing economy counters.
///
/// Money is spendable currency; risk, reward, and deception are running
/// accumulators that shape the next wave and the daily tribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyState {
    pub money: i32,
    pub risk: f32,
    pub reward: f32,
    pub deception: f32,
    pub placable_bodies: i32,
}

impl Default for EconomyState {
    fn default() -> Self {
        Self {
            money: STARTING_MONEY,
            risk: 0.0,
            reward: 0.0,
            deception: 0.0,
            placable_bodies: 0,
        }
    }
}

/// How an adventurer's day ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Death,
    Fled,
    Escaped,
}

impl OutcomeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Death => "death",
            Self::Fled => "fled",
            Self::Escaped => "escaped",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of one adventurer, produced exactly once per agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub kind: OutcomeKind,
    pub level: i32,
    pub money: i32,
    pub risk: f32,
    pub reward: f32,
    pub deception: f32,
}

impl OutcomeRecord {
    /// A kill by a trap: pays out the carried loot plus a level bounty and
    /// raises risk; fire kills also add a flat deception bonus.
    #[must_use]
    pub fn death(level: i32, loot: i32, risk_per_level: f32, deception: f32) -> Self {
        Self {
            kind: OutcomeKind::Death,
            level,
            money: loot + DEATH_MONEY_BASE + level * DEATH_MONEY_PER_LEVEL,
            risk: level as f32 * risk_per_level,
            reward: 0.0,
            deception,
        }
    }

    /// A terrified adventurer who made it back out.
    #[must_use]
    pub fn fled(level: i32, loot: i32, courage: i32) -> Self {
        Self {
            kind: OutcomeKind::Fled,
            level,
            money: 0,
            risk: 0.0,
            reward: loot as f32 / LOOT_REWARD_DIVISOR,
            deception: (level - courage + 1) as f32 * FLED_DECEPTION_FACTOR,
        }
    }

    /// An adventurer who explored everything and left with courage intact.
    #[must_use]
    pub fn escaped(level: i32, loot: i32, courage: i32) -> Self {
        Self {
            kind: OutcomeKind::Escaped,
            level,
            money: 0,
            risk: 0.0,
            reward: loot as f32 / LOOT_REWARD_DIVISOR,
            deception: -(courage as f32) - level as f32 * ESCAPED_LEVEL_FACTOR,
        }
    }

    /// Narrative tags for this record, as shown on the day report.
    #[must_use]
    pub fn tags(&self) -> OutcomeTags {
        let mut tags = OutcomeTags::new();
        if self.money > 0 {
            tags.push(format!("${}", self.money));
        }
        if let Some(tag) = stat_tag("Risk", self.risk) {
            tags.push(tag);
        }
        if let Some(tag) = stat_tag("Reward", self.reward) {
            tags.push(tag);
        }
        if let Some(tag) = stat_tag("Deception", self.deception) {
            tags.push(tag);
        }
        tags
    }
}

/// Tag capacity covers the money tag plus all three stat markers.
pub type OutcomeTags = SmallVec<[String; 4]>;

fn stat_tag(label: &str, delta: f32) -> Option<String> {
    if delta > TAG_STRONG_THRESHOLD {
        Some(format!("{label}++"))
    } else if delta < -TAG_STRONG_THRESHOLD {
        Some(format!("{label}--"))
    } else if delta > 0.0 {
        Some(format!("{label}+"))
    } else if delta < 0.0 {
        Some(format!("{label}-"))
    } else {
        None
    }
}

/// One line of a settled day report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeLine {
    pub kind: OutcomeKind,
    pub level: i32,
    pub tags: OutcomeTags,
}

/// Everything a host needs to present the end of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u32,
    pub lines: Vec<OutcomeLine>,
    pub tribute: i32,
    pub money: i32,
    pub risk: f32,
    pub reward: f32,
    pub deception: f32,
}

/// Collapse the day's outcome records into the economy.
///
/// Running stats decay first, then each record contributes (money only when
/// positive), then stats are floored at zero and the remaining deception is
/// paid out as tribute. The record list is consumed.
pub fn settle_day(
    day: u32,
    economy: &mut EconomyState,
    outcomes: &mut Vec<OutcomeRecord>,
) -> DayReport {
    economy.risk *= STAT_DECAY;
    economy.reward *= STAT_DECAY;
    economy.deception *= STAT_DECAY;

    let mut lines = Vec::with_capacity(outcomes.len());
    for record in outcomes.drain(..) {
        if record.money > 0 {
            economy.money += record.money;
        }
        economy.risk += record.risk;
        economy.reward += record.reward;
        economy.deception += record.deception;
        lines.push(OutcomeLine {
            kind: record.kind,
            level: record.level,
            tags: record.tags(),
        });
    }

    economy.risk = economy.risk.max(0.0);
    economy.reward = economy.reward.max(0.0);
    economy.deception = economy.deception.max(0.0);

    let tribute = trunc_f32_to_i32(economy.deception);
    economy.money += tribute;

    DayReport {
        day,
        lines,
        tribute,
        money: economy.money,
        risk: economy.risk,
        reward: economy.reward,
        deception: economy.deception,
    }
}
