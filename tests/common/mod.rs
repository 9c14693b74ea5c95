//! Shared fixtures and mocks for the control-surface tests.
#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use mockall::mock;
use serenity::all::{ChannelId, CreateActionRow, CreateEmbed, GuildId, MessageId, User};
use serenity::async_trait;

use rockola::messenger::Messenger;
use rockola::player::Track;

static TRACING: Once = Once::new();

/// Install a log subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("rockola=debug")
            .with_test_writer()
            .try_init();
    });
}

mock! {
    pub Messenger {}

    #[async_trait]
    impl Messenger for Messenger {
        async fn send_text(
            &self,
            channel_id: ChannelId,
            content: String,
        ) -> serenity::Result<MessageId>;

        async fn send_panel(
            &self,
            channel_id: ChannelId,
            embed: CreateEmbed,
            components: Vec<CreateActionRow>,
        ) -> serenity::Result<MessageId>;

        async fn delete_message(
            &self,
            channel_id: ChannelId,
            message_id: MessageId,
        ) -> serenity::Result<()>;
    }
}

pub fn guild() -> GuildId {
    GuildId::new(900)
}

pub fn channel() -> ChannelId {
    ChannelId::new(901)
}

pub fn voice_channel() -> ChannelId {
    ChannelId::new(902)
}

pub fn track(title: &str) -> Track {
    Track {
        title: title.to_string(),
        url: format!("https://example.com/watch?v={title}"),
        duration: Some(Duration::from_secs(214)),
        thumbnail: Some("https://example.com/thumb.jpg".to_string()),
        requested_by: "<@4242>".to_string(),
        views: Some(1_000_000),
        likes: Some(50_000),
    }
}

pub fn invoker() -> User {
    User::default()
}
