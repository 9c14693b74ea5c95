use std::sync::Arc;

use serenity::all::{ChannelId, Context, GuildId, User, UserId};
use songbird::Songbird;
use thiserror::Error;
use tracing::{debug, error};

pub mod action;
pub mod gate;
pub mod handler;
pub mod now_playing;

pub use action::{canned_reply, parse_component, parse_message, Action, PageDirection, Surface};

use crate::player::PlayerError;
use crate::ui::Reply;
use crate::Data;

/// Refusals and failures of the control surface. The display form feeds the
/// logs; [`ControlError::user_message`] is what the member sees.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("missing or malformed argument")]
    InvalidArgument { usage: String },
    #[error("position {given} outside {min}..={max}")]
    OutOfRange {
        given: usize,
        min: usize,
        max: usize,
    },
    #[error("invoker is not in a voice channel")]
    NotInVoiceChannel,
    #[error("invoker is in a different voice channel than the bot")]
    WrongVoiceChannel,
    #[error("no active queue for this guild")]
    NoActiveQueue,
    #[error("player failure: {0}")]
    Upstream(#[from] PlayerError),
    #[error("audio control failed: {0}")]
    AudioControl(PlayerError),
    #[error("unknown component id {0:?}")]
    UnknownAction(String),
}

impl ControlError {
    /// User-facing refusal text, in the bot's voice.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument { usage } => usage.clone(),
            Self::OutOfRange { min, max, .. } => {
                format!("Por favor, proporciona un número entre {min} y {max}.")
            }
            Self::NotInVoiceChannel => {
                "¡Debes estar en un canal de voz para usar este comando!".to_string()
            }
            Self::WrongVoiceChannel => {
                "¡Debes estar en el mismo canal de voz que el bot para usar este comando!"
                    .to_string()
            }
            Self::NoActiveQueue => "No hay ninguna canción en reproducción.".to_string(),
            Self::Upstream(_) => "Hubo un error al intentar reproducir la canción.".to_string(),
            Self::AudioControl(_) => "Hubo un error al procesar esta acción.".to_string(),
            Self::UnknownAction(_) => "Acción no reconocida.".to_string(),
        }
    }
}

/// Where a request came from and who issued it, independent of the surface.
pub struct Invocation<'a> {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub invoker: &'a User,
    pub invoker_voice: Option<ChannelId>,
    pub surface: Surface,
}

/// Voice gate for an action, without applying it. The deferring slash path
/// runs this on its own first, while a refusal can still go out ephemeral.
pub async fn check_gate(
    ctx: &Context,
    invocation: &Invocation<'_>,
    action: &Action,
) -> Result<(), ControlError> {
    let bot_voice = if action.requires_voice() {
        match songbird::get(ctx).await {
            Some(manager) => bot_voice_channel(&manager, invocation.guild_id).await,
            None => None,
        }
    } else {
        None
    };
    gate::authorize(action, invocation.invoker_voice, bot_voice)
}

/// Gate an action against the voice-channel rules, then apply it. Every
/// surface funnels through here.
pub async fn run_action(
    ctx: &Context,
    data: &Data,
    invocation: &Invocation<'_>,
    action: Action,
) -> Result<Reply, ControlError> {
    check_gate(ctx, invocation, &action).await?;
    let voice = songbird::get(ctx).await;
    handler::apply(data, voice.as_ref(), invocation, action).await
}

/// Voice channel the member currently sits in, from the gateway cache.
pub fn member_voice_channel(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
) -> Option<ChannelId> {
    let guild = ctx.cache.guild(guild_id)?;
    guild
        .voice_states
        .get(&user_id)
        .and_then(|state| state.channel_id)
}

/// Voice channel the bot currently sits in, if it holds a call here.
pub async fn bot_voice_channel(manager: &Arc<Songbird>, guild_id: GuildId) -> Option<ChannelId> {
    let call = manager.get(guild_id)?;
    let channel = call.lock().await.current_channel()?;
    Some(ChannelId::new(channel.0.get()))
}

/// Turn a refusal into the single reply the member gets. Player failures are
/// worth an error log; plain refusals only show up at debug level.
pub fn render_refusal(error: &ControlError) -> Reply {
    match error {
        ControlError::Upstream(detail) | ControlError::AudioControl(detail) => {
            error!("Player failure behind a refusal: {}", detail)
        }
        other => debug!("Refused action: {}", other),
    }
    Reply::private(error.user_message())
}
