//! Power-up kinds and their effects.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PowerUpTuning};

/// Identifier of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKindId {
    DoubleDamage,
    Shield,
    HealthBoost,
    RapidFire,
    Freeze,
    CriticalHit,
}

impl PowerUpKindId {
    /// Every kind, in catalog order.
    pub const ALL: [PowerUpKindId; 6] = [
        PowerUpKindId::DoubleDamage,
        PowerUpKindId::Shield,
        PowerUpKindId::HealthBoost,
        PowerUpKindId::RapidFire,
        PowerUpKindId::Freeze,
        PowerUpKindId::CriticalHit,
    ];

    const fn slot(self) -> usize {
        match self {
            PowerUpKindId::DoubleDamage => 0,
            PowerUpKindId::Shield => 1,
            PowerUpKindId::HealthBoost => 2,
            PowerUpKindId::RapidFire => 3,
            PowerUpKindId::Freeze => 4,
            PowerUpKindId::CriticalHit => 5,
        }
    }
}

/// What a power-up does.
///
/// Combat code matches on this exhaustively, so a new effect cannot be
/// added without deciding how it interacts with damage resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpEffect {
    /// Owner's punches deal `n` times damage.
    DamageMultiplier(u32),
    /// Damage the owner takes is cut by `percent`, rounded up.
    DamageReduction { percent: u32 },
    /// Owner instantly regains health.
    InstantHeal(u32),
    /// Owner's next punch deals `n` times damage, then the effect is spent.
    CritMultiplierOnce(u32),
    /// Each tap registers `n` punches.
    ClickMultiplier(u32),
    /// Owner's opponent cannot punch for the duration.
    FreezeOpponent,
}

impl PowerUpEffect {
    /// Spent after a single punch.
    #[must_use]
    pub const fn is_one_shot(self) -> bool {
        matches!(self, PowerUpEffect::CritMultiplierOnce(_))
    }
}

/// Immutable catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUpKind {
    pub id: PowerUpKindId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    /// 0 means instant.
    pub duration_ms: u64,
    pub effect: PowerUpEffect,
}

impl PowerUpKind {
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Read-only table of every power-up kind.
///
/// ## Example
///
/// ```
/// use click_brawl::core::{GameRng, PowerUpTuning};
/// use click_brawl::powerups::{PowerUpCatalog, PowerUpKindId};
///
/// let catalog = PowerUpCatalog::from_tuning(&PowerUpTuning::default());
/// assert_eq!(catalog.kind(PowerUpKindId::Shield).name, "Shield");
///
/// let mut rng = GameRng::new(1);
/// let drawn = catalog.random_kind(&mut rng);
/// assert!(PowerUpKindId::ALL.contains(&drawn.id));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUpCatalog {
    kinds: [PowerUpKind; 6],
}

impl PowerUpCatalog {
    /// Build the catalog from tunable magnitudes.
    #[must_use]
    pub fn from_tuning(tuning: &PowerUpTuning) -> Self {
        Self {
            kinds: [
                PowerUpKind {
                    id: PowerUpKindId::DoubleDamage,
                    name: "Double Damage",
                    description: "Your punches deal 2x damage!",
                    icon: "💥",
                    color: "#FF5722",
                    duration_ms: tuning.double_damage_ms,
                    effect: PowerUpEffect::DamageMultiplier(tuning.double_damage_multiplier),
                },
                PowerUpKind {
                    id: PowerUpKindId::Shield,
                    name: "Shield",
                    description: "Take 50% less damage!",
                    icon: "🛡️",
                    color: "#2196F3",
                    duration_ms: tuning.shield_ms,
                    effect: PowerUpEffect::DamageReduction {
                        percent: tuning.shield_reduction_percent,
                    },
                },
                PowerUpKind {
                    id: PowerUpKindId::HealthBoost,
                    name: "Health Boost",
                    description: "Instantly regain health!",
                    icon: "❤️",
                    color: "#4CAF50",
                    duration_ms: 0,
                    effect: PowerUpEffect::InstantHeal(tuning.heal_amount),
                },
                PowerUpKind {
                    id: PowerUpKindId::RapidFire,
                    name: "Rapid Fire",
                    description: "Click once, punch twice!",
                    icon: "⚡",
                    color: "#FFC107",
                    duration_ms: tuning.rapid_fire_ms,
                    effect: PowerUpEffect::ClickMultiplier(tuning.rapid_fire_multiplier),
                },
                PowerUpKind {
                    id: PowerUpKindId::Freeze,
                    name: "Freeze",
                    description: "Opponent cannot attack!",
                    icon: "❄️",
                    color: "#00BCD4",
                    duration_ms: tuning.freeze_ms,
                    effect: PowerUpEffect::FreezeOpponent,
                },
                PowerUpKind {
                    id: PowerUpKindId::CriticalHit,
                    name: "Critical Hit",
                    description: "Your next punch deals 5x damage!",
                    icon: "🎯",
                    color: "#9C27B0",
                    duration_ms: tuning.crit_window_ms,
                    effect: PowerUpEffect::CritMultiplierOnce(tuning.crit_multiplier),
                },
            ],
        }
    }

    /// Look up a kind.
    #[must_use]
    pub fn kind(&self, id: PowerUpKindId) -> &PowerUpKind {
        &self.kinds[id.slot()]
    }

    /// Uniformly random kind.
    pub fn random_kind(&self, rng: &mut GameRng) -> &PowerUpKind {
        &self.kinds[rng.gen_range_usize(0..self.kinds.len())]
    }

    /// Iterate in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &PowerUpKind> {
        self.kinds.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for PowerUpCatalog {
    fn default() -> Self {
        Self::from_tuning(&PowerUpTuning::default())
    }
}
