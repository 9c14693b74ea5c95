use serenity::all::ChannelId;

use super::{Action, ControlError};

/// Voice-channel rules for mutating actions: the invoker must be in a voice
/// channel, and when the bot already holds one, in that same channel.
/// Read-only actions pass unconditionally.
pub fn authorize(
    action: &Action,
    invoker_voice: Option<ChannelId>,
    bot_voice: Option<ChannelId>,
) -> Result<(), ControlError> {
    if !action.requires_voice() {
        return Ok(());
    }

    let invoker_channel = invoker_voice.ok_or(ControlError::NotInVoiceChannel)?;
    match bot_voice {
        Some(bot_channel) if bot_channel != invoker_channel => {
            Err(ControlError::WrongVoiceChannel)
        }
        _ => Ok(()),
    }
}
