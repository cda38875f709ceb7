//! World-side collaborators
//!
//! The host engine implements [`GameWorld`] for each simulated world. The
//! hit-test router only ever holds a weak reference to it.

use crate::foundation::math::Vec2;
use crate::physics::HitResult;

/// Identity of a simulated world (editor preview, game, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldId(pub u64);

/// Identity of a player controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerControllerId(pub u32);

/// Identity of a local (on this machine) player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPlayerId(pub u32);

/// A simulated world that can trace screen positions into the scene
pub trait GameWorld {
    /// World identity
    fn id(&self) -> WorldId;

    /// Whether this world runs gameplay (as opposed to an editor or
    /// thumbnail preview world)
    fn is_game_world(&self) -> bool;

    /// Current frame number; advances once per update pass
    fn frame_number(&self) -> u64;

    /// Player controller of the first local player, if one exists
    fn primary_player_controller(&self) -> Option<PlayerControllerId>;

    /// Trace the scene under a screen position for visibility-relevant geometry
    fn trace_screen_position(
        &self,
        controller: PlayerControllerId,
        screen_position: Vec2,
    ) -> Option<HitResult>;
}
