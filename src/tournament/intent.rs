//! User intents forwarded by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::powerups::SpawnId;

/// One user action. Every intent is paired with the time it happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    SetPlayerName { player: PlayerId, name: String },
    StartTournament,
    Punch { player: PlayerId },
    CollectPowerUp { instance_id: SpawnId, player: PlayerId },
    UsePowerUp { player: PlayerId },
    AdvanceRound,
    ResetTournament,
    SpinDrink,
}
