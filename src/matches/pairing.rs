//! Two-player matchups.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Two distinct players facing each other.
///
/// ```
/// use click_brawl::core::PlayerId;
/// use click_brawl::matches::Pairing;
///
/// let pairing = Pairing::new(PlayerId::new(1), PlayerId::new(3)).unwrap();
/// assert_eq!(pairing.opponent_of(PlayerId::new(3)), Some(PlayerId::new(1)));
/// assert_eq!(pairing.opponent_of(PlayerId::new(2)), None);
/// assert!(Pairing::new(PlayerId::new(2), PlayerId::new(2)).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    a: PlayerId,
    b: PlayerId,
}

impl Pairing {
    /// `None` when both sides are the same player.
    #[must_use]
    pub fn new(a: PlayerId, b: PlayerId) -> Option<Self> {
        (a != b).then_some(Self { a, b })
    }

    #[must_use]
    pub const fn players(&self) -> [PlayerId; 2] {
        [self.a, self.b]
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.a == player || self.b == player
    }

    /// 0 for the first player, 1 for the second.
    #[must_use]
    pub fn side_of(&self, player: PlayerId) -> Option<usize> {
        if player == self.a {
            Some(0)
        } else if player == self.b {
            Some(1)
        } else {
            None
        }
    }

    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        match self.side_of(player)? {
            0 => Some(self.b),
            _ => Some(self.a),
        }
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.a, self.b)
    }
}
