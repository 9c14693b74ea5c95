use std::sync::Arc;

use serenity::all::{ChannelId, CreateActionRow, CreateEmbed, CreateMessage, Http, MessageId};
use serenity::async_trait;

/// Bot-initiated channel traffic: the queued-track notice, the now-playing
/// control message and the deletion of a superseded one.
///
/// Replies to commands and interactions go out on their own surface and do
/// not pass through here.
#[async_trait]
pub trait Messenger: Send + Sync {
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

/// Production messenger over the serenity HTTP client.
pub struct HttpMessenger {
    http: Arc<Http>,
}

impl HttpMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Messenger for HttpMessenger {
    async fn send_text(
        &self,
        channel_id: ChannelId,
        content: String,
    ) -> serenity::Result<MessageId> {
        let message = channel_id
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;
        Ok(message.id)
    }

    async fn send_panel(
        &self,
        channel_id: ChannelId,
        embed: CreateEmbed,
        components: Vec<CreateActionRow>,
    ) -> serenity::Result<MessageId> {
        let message = channel_id
            .send_message(
                &self.http,
                CreateMessage::new().embed(embed).components(components),
            )
            .await?;
        Ok(message.id)
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> serenity::Result<()> {
        self.http.delete_message(channel_id, message_id, None).await
    }
}
