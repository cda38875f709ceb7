//! Host UI framework seam
//!
//! Focus, input mode and reply processing belong to the host application's
//! UI layer. Surface controllers reach them through [`UiHost`].

use super::input::{InputMode, PointerEvent, Reply};
use super::widget::{WidgetPath, WidgetRef};
use crate::world::{LocalPlayerId, PlayerControllerId};

/// Operations a surface controller needs from the host UI framework
pub trait UiHost {
    /// Local player owning a player controller
    fn local_player_for(&self, controller: PlayerControllerId) -> Option<LocalPlayerId>;

    /// Player controller of a local player
    fn player_controller_for(&self, player: LocalPlayerId) -> Option<PlayerControllerId>;

    /// Give user focus to a widget on behalf of a local player
    fn set_user_focus(&self, player: LocalPlayerId, widget: &WidgetRef);

    /// Change how a player's input is routed
    fn set_input_mode(&self, controller: PlayerControllerId, mode: InputMode);

    /// Apply the capture and focus side effects of a reply
    ///
    /// `path` is the widget path the reply applies to; it may be empty when
    /// the current hit no longer resolves to a surface.
    fn process_reply(&self, path: &WidgetPath, reply: &Reply, event: &PointerEvent, user_index: u32);
}
