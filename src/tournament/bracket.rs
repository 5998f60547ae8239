//! Single-elimination rounds and pairing draws.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId};
use crate::matches::Pairing;

/// Pairings of one round. Never more than two.
pub type RoundPairings = SmallVec<[Pairing; 2]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    SemiFinal,
    Final,
}

impl Round {
    /// The round a tournament opens with.
    ///
    /// Four players start at the semi-finals; two go straight to the final.
    #[must_use]
    pub fn first_for(roster_size: usize) -> Self {
        if roster_size <= 2 {
            Round::Final
        } else {
            Round::SemiFinal
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Round::SemiFinal => Some(Round::Final),
            Round::Final => None,
        }
    }

    /// Banner text for the round.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Round::SemiFinal => "SEMI-FINALS",
            Round::Final => "CHAMPIONSHIP FINAL",
        }
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Shuffle `players` and pair them off in order.
///
/// The shuffle is a uniform permutation; an odd player out is left unpaired.
pub fn draw_pairings(players: &[PlayerId], rng: &mut GameRng) -> RoundPairings {
    let mut pool: SmallVec<[PlayerId; 4]> = players.iter().copied().collect();
    rng.shuffle(&mut pool);

    pool.chunks_exact(2)
        .filter_map(|pair| Pairing::new(pair[0], pair[1]))
        .collect()
}
