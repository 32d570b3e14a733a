//! Pool-owned transient effects: scare markers and fire-trap sparks.
//!
//! Effects are simulation entities with countdown lifetimes. The pool owns
//! them outright and sweeps expired ones during its own tick, so an effect
//! never dangles when the agent or trap that spawned it goes away.

use rand::Rng;

use crate::constants::{
    FIRE_BURST_SPARKS, FIRE_SPARK_DRAG, FIRE_SPARK_DRIFT, FIRE_SPARK_MAX_SPEED,
    FIRE_SPARK_MAX_TICKS, FIRE_SPARK_MIN_SPEED, FIRE_SPARK_MIN_TICKS, SCARE_EFFECT_OFFSET_Y,
    SCARE_EFFECT_TICKS,
};
use crate::geometry::Vec2;
use crate::rng::RngStreams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Fright marker hovering above a scared adventurer.
    Scare,
    /// One particle of a fire-trap burst.
    FireSpark,
}

/// A single live effect.
#[derive(Debug, Clone)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: Vec2,
    velocity: Vec2,
    ttl: u32,
    max_ttl: u32,
}

impl Effect {
    /// Remaining lifetime in ticks.
    #[must_use]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Fraction of lifetime remaining, for hosts that fade effects out.
    #[must_use]
    pub fn life_fraction(&self) -> f32 {
        if self.max_ttl == 0 {
            return 0.0;
        }
        self.ttl as f32 / self.max_ttl as f32
    }
}

/// Owner of all live transient effects.
#[derive(Debug, Default)]
pub struct EffectPool {
    effects: Vec<Effect>,
}

impl EffectPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Spawn a scare marker just above the frightened agent.
    pub fn scare(&mut self, anchor: Vec2) {
        self.effects.push(Effect {
            kind: EffectKind::Scare,
            position: anchor + Vec2::new(0.0, SCARE_EFFECT_OFFSET_Y),
            velocity: Vec2::default(),
            ttl: SCARE_EFFECT_TICKS,
            max_ttl: SCARE_EFFECT_TICKS,
        });
    }

    /// Spawn a full burst of fire sparks radiating from a triggered trap.
    pub fn fire_burst(&mut self, origin: Vec2, rng: &RngStreams) {
        let mut stream = rng.effects();
        for _ in 0..FIRE_BURST_SPARKS {
            let ttl = stream.random_range(FIRE_SPARK_MIN_TICKS..=FIRE_SPARK_MAX_TICKS);
            let speed = stream.random_range(FIRE_SPARK_MIN_SPEED..FIRE_SPARK_MAX_SPEED);
            let angle = stream.random_range(0.0..360.0);
            self.effects.push(Effect {
                kind: EffectKind::FireSpark,
                position: origin,
                velocity: Vec2::polar(speed, angle),
                ttl,
                max_ttl: ttl,
            });
        }
    }

    /// Advance all effects one tick and drop the expired ones.
    pub fn tick(&mut self) {
        for effect in &mut self.effects {
            if effect.kind == EffectKind::FireSpark {
                effect.position += effect.velocity * FIRE_SPARK_DRIFT;
                effect.velocity = effect.velocity * FIRE_SPARK_DRAG;
            }
            effect.ttl = effect.ttl.saturating_sub(1);
        }
        self.effects.retain(|effect| effect.ttl > 0);
    }
}
