use poise::CreateReply;
use serenity::all::{
    CreateActionRow, CreateEmbed, CreateInteractionResponseMessage, CreateMessage,
};

/// Outcome of a control action, not yet bound to a delivery surface.
///
/// The surface adapters turn this into a channel message, a slash response
/// or a component response; the ephemeral flag only has meaning on the
/// interaction surfaces.
#[derive(Debug, Default)]
pub struct Reply {
    pub content: Option<String>,
    pub embed: Option<CreateEmbed>,
    pub components: Option<Vec<CreateActionRow>>,
    pub ephemeral: bool,
}

impl Reply {
    /// Plain text visible to the whole channel.
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Plain text shown only to the invoker where the surface supports it.
    pub fn private(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ephemeral: true,
            ..Default::default()
        }
    }

    pub fn embed(embed: CreateEmbed) -> Self {
        Self {
            embed: Some(embed),
            ..Default::default()
        }
    }

    pub fn with_components(mut self, rows: Vec<CreateActionRow>) -> Self {
        self.components = Some(rows);
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn into_create_reply(self) -> CreateReply {
        let mut reply = CreateReply::default().ephemeral(self.ephemeral);
        if let Some(content) = self.content {
            reply = reply.content(content);
        }
        if let Some(embed) = self.embed {
            reply = reply.embed(embed);
        }
        if let Some(components) = self.components {
            reply = reply.components(components);
        }
        reply
    }

    pub fn into_response_message(self) -> CreateInteractionResponseMessage {
        let mut message = CreateInteractionResponseMessage::new().ephemeral(self.ephemeral);
        if let Some(content) = self.content {
            message = message.content(content);
        }
        if let Some(embed) = self.embed {
            message = message.embed(embed);
        }
        if let Some(components) = self.components {
            message = message.components(components);
        }
        message
    }

    pub fn into_message(self) -> CreateMessage {
        let mut message = CreateMessage::new();
        if let Some(content) = self.content {
            message = message.content(content);
        }
        if let Some(embed) = self.embed {
            message = message.embed(embed);
        }
        if let Some(components) = self.components {
            message = message.components(components);
        }
        message
    }
}
