use serenity::all::{ChannelId, GuildId, MessageId};
use tracing::debug;

use crate::messenger::Messenger;
use crate::player::{RepeatMode, Track};
use crate::sessions::Sessions;
use crate::ui::{buttons, embeds};

/// Post a fresh control message for the track and delete the previous one,
/// so each guild keeps at most a single live panel. A failed delete only
/// means the old message is already gone.
pub async fn replace_panel(
    sessions: &Sessions,
    messenger: &dyn Messenger,
    guild_id: GuildId,
    channel_id: ChannelId,
    track: &Track,
    repeat: RepeatMode,
) -> serenity::Result<MessageId> {
    if let Some(previous) = sessions.take_control_message(guild_id) {
        if let Err(e) = messenger
            .delete_message(previous.channel_id, previous.message_id)
            .await
        {
            debug!("Previous control message could not be deleted: {}", e);
        }
    }

    let embed = embeds::now_playing_panel(track, repeat);
    let message_id = messenger
        .send_panel(channel_id, embed, buttons::control_rows())
        .await?;
    sessions.record_control_message(guild_id, channel_id, message_id);
    Ok(message_id)
}
