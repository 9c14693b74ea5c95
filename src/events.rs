use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    FullEvent, Interaction, Message,
};
use tracing::{debug, error, info};

use crate::controls::{self, Action, Invocation, Surface};
use crate::ui::Reply;
use crate::{Data, Error};

/// Gateway events the control surface listens on: chat messages for the
/// text commands and banter, component interactions for the panel buttons.
pub async fn handler(
    ctx: &Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot } => {
            info!("Connected as {}", data_about_bot.user.name);
        }
        FullEvent::Message { new_message } => {
            handle_message(ctx, new_message, data).await?;
        }
        FullEvent::InteractionCreate {
            interaction: Interaction::Component(component),
        } => {
            handle_component(ctx, component, data).await;
        }
        _ => {}
    }
    Ok(())
}

async fn handle_message(ctx: &Context, message: &Message, data: &Data) -> Result<(), Error> {
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };
    if message.author.bot {
        return Ok(());
    }

    if let Some(canned) = controls::canned_reply(&message.content) {
        message.reply(&ctx.http, canned).await?;
        return Ok(());
    }

    let Some(parsed) = controls::parse_message(&message.content, &data.config, &message.mentions)
    else {
        return Ok(());
    };

    let reply = match parsed {
        Ok(action) => {
            let invocation = Invocation {
                guild_id,
                channel_id: message.channel_id,
                invoker: &message.author,
                invoker_voice: controls::member_voice_channel(ctx, guild_id, message.author.id),
                surface: Surface::Text,
            };
            match controls::run_action(ctx, data, &invocation, action).await {
                Ok(reply) => reply,
                Err(error) => controls::render_refusal(&error),
            }
        }
        Err(error) => controls::render_refusal(&error),
    };

    deliver_text_reply(ctx, message, reply).await?;
    Ok(())
}

/// Plain confirmations quote the invoking message; anything carrying an
/// embed or buttons goes to the channel as its own message.
async fn deliver_text_reply(
    ctx: &Context,
    message: &Message,
    reply: Reply,
) -> serenity::Result<()> {
    if reply.embed.is_some() || reply.components.is_some() {
        message
            .channel_id
            .send_message(&ctx.http, reply.into_message())
            .await?;
    } else if let Some(content) = reply.content {
        message.reply(&ctx.http, content).await?;
    }
    Ok(())
}

/// A button press gets exactly one interaction response: page turns edit
/// the queue message in place, everything else answers with a new message.
async fn handle_component(ctx: &Context, component: &ComponentInteraction, data: &Data) {
    let Some(guild_id) = component.guild_id else {
        return;
    };

    let response = match controls::parse_component(&component.data.custom_id) {
        Err(error) => CreateInteractionResponse::Message(
            controls::render_refusal(&error).into_response_message(),
        ),
        Ok(action) => {
            let turns_page = matches!(action, Action::PageNav(_));
            let invocation = Invocation {
                guild_id,
                channel_id: component.channel_id,
                invoker: &component.user,
                invoker_voice: controls::member_voice_channel(ctx, guild_id, component.user.id),
                surface: Surface::Component,
            };
            match controls::run_action(ctx, data, &invocation, action).await {
                Ok(reply) if turns_page => {
                    CreateInteractionResponse::UpdateMessage(reply.into_response_message())
                }
                Ok(reply) => CreateInteractionResponse::Message(reply.into_response_message()),
                Err(error) => CreateInteractionResponse::Message(
                    controls::render_refusal(&error).into_response_message(),
                ),
            }
        }
    };

    if let Err(first) = component.create_response(&ctx.http, response).await {
        error!("Failed to respond to component interaction: {}", first);
        let fallback = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content("Hubo un error al procesar esta acción.")
                .ephemeral(true),
        );
        if let Err(second) = component.create_response(&ctx.http, fallback).await {
            debug!("Fallback interaction response also failed: {}", second);
        }
    }
}
