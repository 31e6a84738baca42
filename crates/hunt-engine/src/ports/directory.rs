//! Identity collaborator port.

use crate::domain::GameError;
use hunt_types::{PlayerId, PlayerSummary};

/// Supplies stable display attributes for players.
///
/// The engine never creates or edits accounts; profile management belongs
/// to the identity collaborator.
pub trait PlayerDirectory: Send + Sync {
    /// Display attributes for a player, absent if the id is unknown.
    fn summary(&self, player: PlayerId) -> Result<Option<PlayerSummary>, GameError>;
}
