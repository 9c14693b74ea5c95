use dashmap::DashMap;
use serenity::all::{ChannelId, GuildId, MessageId};

/// Reference to the live now-playing control message of a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMessageRef {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

#[derive(Debug, Default)]
struct GuildSession {
    control_message: Option<ControlMessageRef>,
    queue_page: usize,
}

/// Per-guild transient UI state: the tracked control message and the last
/// queue page a user navigated to.
///
/// Entries are created lazily and live for the process lifetime. Reads and
/// writes are individually atomic; two handlers interleaving across awaits
/// can still overwrite each other's page or message ref, which is accepted
/// for UI state.
#[derive(Debug, Default)]
pub struct Sessions {
    guilds: DashMap<GuildId, GuildSession>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_page(&self, guild_id: GuildId) -> usize {
        self.guilds
            .get(&guild_id)
            .map(|session| session.queue_page)
            .unwrap_or(0)
    }

    pub fn set_queue_page(&self, guild_id: GuildId, page: usize) {
        self.guilds.entry(guild_id).or_default().queue_page = page;
    }

    pub fn reset_queue_page(&self, guild_id: GuildId) {
        self.set_queue_page(guild_id, 0);
    }

    pub fn control_message(&self, guild_id: GuildId) -> Option<ControlMessageRef> {
        self.guilds
            .get(&guild_id)
            .and_then(|session| session.control_message)
    }

    /// Remove and return the tracked control message, if any.
    pub fn take_control_message(&self, guild_id: GuildId) -> Option<ControlMessageRef> {
        self.guilds
            .get_mut(&guild_id)
            .and_then(|mut session| session.control_message.take())
    }

    /// Record a freshly sent control message, overwriting any previous ref.
    pub fn record_control_message(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) {
        self.guilds.entry(guild_id).or_default().control_message = Some(ControlMessageRef {
            channel_id,
            message_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild() -> GuildId {
        GuildId::new(1)
    }

    #[test]
    fn page_defaults_to_zero() {
        let sessions = Sessions::new();
        assert_eq!(sessions.queue_page(guild()), 0);
    }

    #[test]
    fn page_round_trips_and_resets() {
        let sessions = Sessions::new();
        sessions.set_queue_page(guild(), 3);
        assert_eq!(sessions.queue_page(guild()), 3);
        sessions.reset_queue_page(guild());
        assert_eq!(sessions.queue_page(guild()), 0);
    }

    #[test]
    fn take_clears_the_control_message() {
        let sessions = Sessions::new();
        let expected = ControlMessageRef {
            channel_id: ChannelId::new(10),
            message_id: MessageId::new(20),
        };

        assert_eq!(sessions.take_control_message(guild()), None);
        sessions.record_control_message(guild(), ChannelId::new(10), MessageId::new(20));
        assert_eq!(sessions.control_message(guild()), Some(expected));
        assert_eq!(sessions.take_control_message(guild()), Some(expected));
        assert_eq!(sessions.control_message(guild()), None);
    }

    #[test]
    fn guilds_are_isolated() {
        let sessions = Sessions::new();
        sessions.set_queue_page(GuildId::new(1), 2);
        assert_eq!(sessions.queue_page(GuildId::new(2)), 0);
    }
}
