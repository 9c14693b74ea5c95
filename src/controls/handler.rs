use std::sync::Arc;

use serenity::all::{GuildId, Mentionable, User};
use songbird::Songbird;
use tracing::{debug, warn};

use super::{now_playing, Action, ControlError, Invocation, PageDirection, Surface};
use crate::player::{playback, source, PlayerError, RepeatMode};
use crate::ui::pagination::{self, PAGE_SIZE};
use crate::ui::{buttons, embeds, format_duration_opt, Reply};
use crate::Data;

/// Apply an already-gated action and produce the single reply for it.
pub async fn apply(
    data: &Data,
    voice: Option<&Arc<Songbird>>,
    invocation: &Invocation<'_>,
    action: Action,
) -> Result<Reply, ControlError> {
    match action {
        Action::Play { query } => play(data, voice, invocation, query).await,
        Action::Pause => pause(data, invocation.guild_id).await,
        Action::Resume => resume(data, invocation.guild_id).await,
        Action::Skip => skip(data, invocation.guild_id).await,
        Action::Stop => stop(data, voice, invocation.guild_id).await,
        Action::Shuffle => shuffle(data, invocation.guild_id).await,
        Action::SetLoop(mode) => set_loop(data, invocation, mode).await,
        Action::ShowQueue => show_queue(data, invocation).await,
        Action::Remove { position } => remove(data, invocation.guild_id, position).await,
        Action::PageNav(direction) => page_nav(data, invocation.guild_id, direction).await,
        Action::Avatar(target) => Ok(avatar(invocation, target)),
        Action::Help => Ok(help(data)),
    }
}

/// Trimmed play query, or the usage refusal when nothing remains. The slash
/// surface checks this before deferring its response.
pub fn play_query(query: &str) -> Result<&str, ControlError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ControlError::InvalidArgument {
            usage: "Proporciona un enlace o nombre de una canción.".to_string(),
        });
    }
    Ok(trimmed)
}

async fn play(
    data: &Data,
    voice: Option<&Arc<Songbird>>,
    invocation: &Invocation<'_>,
    query: String,
) -> Result<Reply, ControlError> {
    let query = play_query(&query)?;

    let track = source::resolve(query, invocation.invoker.mention().to_string()).await?;

    let manager = voice.ok_or(ControlError::Upstream(PlayerError::VoiceUnavailable))?;
    let call = match manager.get(invocation.guild_id) {
        Some(call) => call,
        None => {
            let channel = invocation
                .invoker_voice
                .ok_or(ControlError::NotInVoiceChannel)?;
            manager
                .join(invocation.guild_id, channel)
                .await
                .map_err(PlayerError::from)?
        }
    };

    let enqueued = data
        .player
        .enqueue(invocation.guild_id, track.clone(), invocation.channel_id)
        .await;

    if enqueued.started {
        playback::start_head(
            &data.playback_context(),
            &call,
            invocation.guild_id,
            track.clone(),
            true,
        )
        .await?;
        Ok(Reply::public(format!(
            "▶️ Reproduciendo ahora: **{}**",
            track.title
        )))
    } else {
        Ok(Reply::public(format!(
            "✅ Se ha añadido a la cola: **{}** - `{}`",
            track.title,
            format_duration_opt(track.duration)
        )))
    }
}

async fn pause(data: &Data, guild_id: GuildId) -> Result<Reply, ControlError> {
    let snapshot = data
        .player
        .snapshot(guild_id)
        .await
        .ok_or(ControlError::NoActiveQueue)?;
    if snapshot.paused {
        return Ok(Reply::private("La canción ya está pausada."));
    }

    data.player
        .set_paused(guild_id, true)
        .await
        .map_err(ControlError::AudioControl)?;
    Ok(Reply::public("⏸️ La canción ha sido pausada."))
}

async fn resume(data: &Data, guild_id: GuildId) -> Result<Reply, ControlError> {
    let snapshot = data
        .player
        .snapshot(guild_id)
        .await
        .ok_or(ControlError::NoActiveQueue)?;
    if !snapshot.paused {
        return Ok(Reply::private("La canción ya está en reproducción."));
    }

    data.player
        .set_paused(guild_id, false)
        .await
        .map_err(ControlError::AudioControl)?;
    Ok(Reply::public("▶️ La canción ha sido reanudada."))
}

async fn skip(data: &Data, guild_id: GuildId) -> Result<Reply, ControlError> {
    let snapshot = data
        .player
        .snapshot(guild_id)
        .await
        .ok_or(ControlError::NoActiveQueue)?;
    if snapshot.tracks.len() <= 1 {
        return Ok(Reply::private("No hay otra canción en la cola para saltar."));
    }

    data.player
        .request_skip(guild_id)
        .await
        .map_err(ControlError::AudioControl)?;
    Ok(Reply::public("⏭️ Canción saltada."))
}

async fn stop(
    data: &Data,
    voice: Option<&Arc<Songbird>>,
    guild_id: GuildId,
) -> Result<Reply, ControlError> {
    let queue = data
        .player
        .take_queue(guild_id)
        .await
        .ok_or(ControlError::NoActiveQueue)?;

    // The queue entry is already gone, so the end event this stop fires
    // finds nothing to advance.
    if let Some(handle) = queue.handle {
        if let Err(e) = handle.stop() {
            warn!("Failed to stop the current track: {}", e);
        }
    }

    if let Some(manager) = voice {
        if manager.get(guild_id).is_some() {
            if let Err(e) = manager.remove(guild_id).await {
                warn!("Failed to leave the voice channel: {}", e);
            }
        }
    }

    if let Some(panel) = data.sessions.take_control_message(guild_id) {
        if let Err(e) = data
            .messenger
            .delete_message(panel.channel_id, panel.message_id)
            .await
        {
            debug!("Control message was already gone: {}", e);
        }
    }

    Ok(Reply::public(
        "⏹️ La reproducción ha sido detenida y el bot ha salido del canal de voz.",
    ))
}

async fn shuffle(data: &Data, guild_id: GuildId) -> Result<Reply, ControlError> {
    if !data.player.shuffle(guild_id).await {
        return Err(ControlError::NoActiveQueue);
    }
    Ok(Reply::public("🔀 La cola ha sido mezclada."))
}

async fn set_loop(
    data: &Data,
    invocation: &Invocation<'_>,
    mode: Option<RepeatMode>,
) -> Result<Reply, ControlError> {
    let applied = data
        .player
        .set_repeat(invocation.guild_id, mode)
        .await
        .ok_or(ControlError::NoActiveQueue)?;

    // The button cycle changes the mode shown on the panel, so redraw it.
    if invocation.surface == Surface::Component {
        refresh_panel(data, invocation.guild_id).await;
    }

    Ok(Reply::public(format!(
        "🔁 Modo de repetición establecido a **{applied}**."
    )))
}

async fn refresh_panel(data: &Data, guild_id: GuildId) {
    let Some(snapshot) = data.player.snapshot(guild_id).await else {
        return;
    };
    let Some(track) = snapshot.tracks.first() else {
        return;
    };
    let refresh = now_playing::replace_panel(
        &data.sessions,
        data.messenger.as_ref(),
        guild_id,
        snapshot.text_channel,
        track,
        snapshot.repeat,
    )
    .await;
    if let Err(e) = refresh {
        warn!("Failed to refresh the control message: {}", e);
    }
}

async fn show_queue(data: &Data, invocation: &Invocation<'_>) -> Result<Reply, ControlError> {
    let snapshot = data
        .player
        .snapshot(invocation.guild_id)
        .await
        .ok_or(ControlError::NoActiveQueue)?;

    // Explicitly opening the queue always starts from the first page.
    data.sessions.reset_queue_page(invocation.guild_id);
    let view = pagination::paginate(&snapshot.tracks, 0, PAGE_SIZE);
    // The button path shows the queue only to whoever pressed it.
    Ok(queue_reply(&view).ephemeral(invocation.surface == Surface::Component))
}

async fn page_nav(
    data: &Data,
    guild_id: GuildId,
    direction: PageDirection,
) -> Result<Reply, ControlError> {
    let snapshot = data
        .player
        .snapshot(guild_id)
        .await
        .ok_or(ControlError::NoActiveQueue)?;

    let current = data.sessions.queue_page(guild_id);
    let requested = match direction {
        PageDirection::Prev => current.saturating_sub(1),
        PageDirection::Next => current.saturating_add(1),
    };
    let view = pagination::paginate(&snapshot.tracks, requested, PAGE_SIZE);
    data.sessions.set_queue_page(guild_id, view.page);
    Ok(queue_reply(&view))
}

fn queue_reply(view: &pagination::Page<'_, crate::player::Track>) -> Reply {
    Reply::embed(embeds::queue_page(view))
        .with_components(vec![buttons::pagination_row(view.page, view.total_pages)])
}

async fn remove(data: &Data, guild_id: GuildId, position: usize) -> Result<Reply, ControlError> {
    let snapshot = data
        .player
        .snapshot(guild_id)
        .await
        .ok_or(ControlError::NoActiveQueue)?;

    let len = snapshot.tracks.len();
    if len <= 1 {
        return Ok(Reply::private(
            "No hay canciones en la cola que se puedan eliminar.",
        ));
    }
    if position < 2 || position > len {
        return Err(ControlError::OutOfRange {
            given: position,
            min: 2,
            max: len,
        });
    }

    let removed = data
        .player
        .remove(guild_id, position)
        .await
        .ok_or(ControlError::OutOfRange {
            given: position,
            min: 2,
            max: len,
        })?;
    Ok(Reply::public(format!(
        "🗑️ Se ha eliminado **{}** de la cola.",
        removed.title
    )))
}

fn avatar(invocation: &Invocation<'_>, target: Option<User>) -> Reply {
    let user = target.unwrap_or_else(|| invocation.invoker.clone());
    Reply::embed(embeds::avatar(&user))
}

fn help(data: &Data) -> Reply {
    Reply::embed(embeds::help(&data.config.command_prefix))
}
