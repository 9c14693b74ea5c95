use poise::serenity_prelude as serenity;

use crate::controls::{self, handler, Action, ControlError, Invocation, Surface};
use crate::player::RepeatMode;
use crate::{CommandResult, Context, Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        play(),
        pause(),
        resume(),
        skip(),
        stop(),
        shuffle(),
        loop_command(),
        queue(),
        remove(),
        avatar(),
    ]
}

/// Every slash command goes through the same gate-and-apply path as the
/// text and button surfaces, then answers with the reply it produced.
async fn dispatch(ctx: Context<'_>, action: Action) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("Este comando solo funciona dentro de un servidor.")
            .await?;
        return Ok(());
    };
    respond(ctx, &invocation_of(ctx, guild_id), action).await
}

fn invocation_of(ctx: Context<'_>, guild_id: serenity::GuildId) -> Invocation<'_> {
    let invoker = ctx.author();
    Invocation {
        guild_id,
        channel_id: ctx.channel_id(),
        invoker,
        invoker_voice: controls::member_voice_channel(ctx.serenity_context(), guild_id, invoker.id),
        surface: Surface::Slash,
    }
}

async fn respond(ctx: Context<'_>, invocation: &Invocation<'_>, action: Action) -> CommandResult {
    let reply =
        match controls::run_action(ctx.serenity_context(), ctx.data(), invocation, action).await {
            Ok(reply) => reply,
            Err(error) => controls::render_refusal(&error),
        };
    ctx.send(reply.into_create_reply()).await?;
    Ok(())
}

/// Argument and voice-gate refusals for the play path, checked while the
/// response can still be ephemeral.
async fn play_precheck(
    ctx: &serenity::Context,
    invocation: &Invocation<'_>,
    action: &Action,
) -> Result<(), ControlError> {
    if let Action::Play { query } = action {
        handler::play_query(query)?;
    }
    controls::check_gate(ctx, invocation, action).await
}

/// Reproduce una canción o la añade a la cola.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn play(
    ctx: Context<'_>,
    #[rename = "cancion"]
    #[description = "Nombre o enlace de la canción"]
    query: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("Este comando solo funciona dentro de un servidor.")
            .await?;
        return Ok(());
    };
    let invocation = invocation_of(ctx, guild_id);
    let action = Action::Play { query };

    // Refusals go out before the deferral: deferring pins the response
    // visibility, and these must stay visible only to the invoker.
    if let Err(error) = play_precheck(ctx.serenity_context(), &invocation, &action).await {
        ctx.send(controls::render_refusal(&error).into_create_reply())
            .await?;
        return Ok(());
    }

    // Resolving through yt-dlp can take longer than the interaction window.
    ctx.defer().await?;
    respond(ctx, &invocation, action).await
}

/// Pausa la canción actual en reproducción.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Action::Pause).await
}

/// Reanuda la canción pausada.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Action::Resume).await
}

/// Salta a la siguiente canción en la cola.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Action::Skip).await
}

/// Detiene la reproducción y saca al bot del canal de voz.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Action::Stop).await
}

/// Mezcla aleatoriamente las canciones en la cola.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn shuffle(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Action::Shuffle).await
}

/// Establece el modo de repetición.
#[poise::command(slash_command, guild_only, rename = "loop", category = "Música")]
pub async fn loop_command(
    ctx: Context<'_>,
    #[rename = "modo"]
    #[description = "Modo de repetición: off, song, queue"]
    mode: RepeatMode,
) -> CommandResult {
    dispatch(ctx, Action::SetLoop(Some(mode))).await
}

/// Muestra la cola de canciones actual.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Action::ShowQueue).await
}

/// Elimina una canción de la cola.
#[poise::command(slash_command, guild_only, category = "Música")]
pub async fn remove(
    ctx: Context<'_>,
    #[rename = "numero"]
    #[description = "El número de la canción en la cola que deseas eliminar"]
    position: i64,
) -> CommandResult {
    dispatch(
        ctx,
        Action::Remove {
            position: usize::try_from(position).unwrap_or(0),
        },
    )
    .await
}

/// Muestra la imagen de perfil de un usuario.
#[poise::command(slash_command, guild_only, category = "General")]
pub async fn avatar(
    ctx: Context<'_>,
    #[rename = "usuario"]
    #[description = "El usuario del cual quieres ver el avatar"]
    user: Option<serenity::User>,
) -> CommandResult {
    dispatch(ctx, Action::Avatar(user)).await
}
