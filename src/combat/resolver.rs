//! Damage resolution for a single punch.

use serde::{Deserialize, Serialize};

use crate::powerups::{ActiveSet, PowerUpEffect};

/// Result of resolving one punch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike {
    /// Punches registered for the attacker's click counter.
    pub clicks: u32,
    /// Health removed from the defender (at least 1).
    pub damage: u32,
    /// A critical hit was spent on this punch.
    pub critical: bool,
}

/// Punches registered by `base_clicks` taps under the attacker's click
/// multipliers.
#[must_use]
pub fn registered_clicks(base_clicks: u32, attacker: &ActiveSet) -> u32 {
    attacker.iter().fold(base_clicks, |clicks, p| match p.effect {
        PowerUpEffect::ClickMultiplier(n) => clicks.saturating_mul(n),
        PowerUpEffect::DamageMultiplier(_)
        | PowerUpEffect::DamageReduction { .. }
        | PowerUpEffect::InstantHeal(_)
        | PowerUpEffect::CritMultiplierOnce(_)
        | PowerUpEffect::FreezeOpponent => clicks,
    })
}

/// Resolve a punch against the running power-ups of both fighters.
///
/// 1. Click multipliers turn one tap into several registered punches.
/// 2. Attacker amplifiers apply in collection order. Only the oldest
///    critical hit applies, and it is removed from `attacker`.
/// 3. Defender reductions apply, rounding up.
/// 4. The result is at least 1.
///
/// Freeze has no effect here; it only blocks the frozen fighter's punches.
pub fn resolve_strike(base_clicks: u32, attacker: &mut ActiveSet, defender: &ActiveSet) -> Strike {
    let clicks = registered_clicks(base_clicks, attacker);
    let mut damage = u64::from(clicks);
    let mut crit_index = None;

    for (index, power_up) in attacker.iter().enumerate() {
        match power_up.effect {
            PowerUpEffect::DamageMultiplier(n) => damage = damage.saturating_mul(u64::from(n)),
            PowerUpEffect::CritMultiplierOnce(n) => {
                if crit_index.is_none() {
                    damage = damage.saturating_mul(u64::from(n));
                    crit_index = Some(index);
                }
            }
            PowerUpEffect::DamageReduction { .. }
            | PowerUpEffect::InstantHeal(_)
            | PowerUpEffect::ClickMultiplier(_)
            | PowerUpEffect::FreezeOpponent => {}
        }
    }

    for power_up in defender.iter() {
        match power_up.effect {
            PowerUpEffect::DamageReduction { percent } => {
                let kept = 100 - u64::from(percent.min(100));
                damage = (damage.saturating_mul(kept) + 99) / 100;
            }
            PowerUpEffect::DamageMultiplier(_)
            | PowerUpEffect::InstantHeal(_)
            | PowerUpEffect::CritMultiplierOnce(_)
            | PowerUpEffect::ClickMultiplier(_)
            | PowerUpEffect::FreezeOpponent => {}
        }
    }

    if let Some(index) = crit_index {
        attacker.remove(index);
    }

    Strike {
        clicks,
        damage: u32::try_from(damage).unwrap_or(u32::MAX).max(1),
        critical: crit_index.is_some(),
    }
}

/// Damage dealt by a punch. See [`resolve_strike`].
pub fn resolve_damage(base_clicks: u32, attacker: &mut ActiveSet, defender: &ActiveSet) -> u32 {
    resolve_strike(base_clicks, attacker, defender).damage
}
