//! Built-in parsers, registered ahead of any host parser.

mod action;
mod condition;

pub use action::{SoundParser, TextAction, TextTarget};
pub use condition::PermissionParser;

use crate::fragment::Shape;
use crate::reader::InterfaceReader;

/// Register the built-ins on `reader`, in their fixed order.
pub fn register_builtins(reader: &InterfaceReader) {
    let config = reader.config();
    let placeholder = config.placeholders.player.clone();

    reader
        .register_action_parser(
            "send_message",
            Shape::Scalar,
            TextAction::new(TextTarget::Message, placeholder.clone()),
        )
        .register_action_parser(
            "broadcast",
            Shape::Scalar,
            TextAction::new(TextTarget::Broadcast, placeholder.clone()),
        )
        .register_action_parser(
            "run_command",
            Shape::Scalar,
            TextAction::new(TextTarget::Command, placeholder.clone()),
        )
        .register_action_parser(
            "run_console_command",
            Shape::Scalar,
            TextAction::new(TextTarget::ConsoleCommand, placeholder),
        )
        .register_action_parser("play_sound", Shape::Object, SoundParser::new(config.sound.clone()))
        .register_condition_parser("permission", Shape::Scalar, PermissionParser::granted())
        .register_condition_parser("no_permission", Shape::Scalar, PermissionParser::denied());
}
