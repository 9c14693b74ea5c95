use std::sync::Arc;

use serenity::all::{ChannelId, GuildId};
use serenity::async_trait;
use songbird::events::{Event, EventContext, EventHandler, TrackEvent};
use songbird::input::YoutubeDl;
use songbird::Call;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::{Advance, Player, PlayerError, Track};
use crate::controls::now_playing;
use crate::messenger::Messenger;
use crate::sessions::Sessions;

/// Everything the audio driver needs besides the call itself. Cloned into
/// the end notifier so playback keeps advancing without a gateway event.
#[derive(Clone)]
pub struct PlaybackContext {
    pub player: Arc<Player>,
    pub sessions: Arc<Sessions>,
    pub messenger: Arc<dyn Messenger>,
    pub http_client: reqwest::Client,
}

/// Start the queue head on the call. When a track fails to start it is
/// dropped and the rest of the queue is tried in order, so one dead source
/// never stalls the guild. Returns the first failure even when a later
/// track ends up playing.
pub async fn start_head(
    ctx: &PlaybackContext,
    call: &Arc<Mutex<Call>>,
    guild_id: GuildId,
    track: Track,
    announce: bool,
) -> Result<(), PlayerError> {
    let mut first_failure = None;
    let mut next = Some((track, announce));

    while let Some((track, announce)) = next.take() {
        match start_track(ctx, call, guild_id, &track, announce).await {
            Ok(()) => break,
            Err(e) => {
                warn!("{:?} never started for guild {}: {}", track.title, guild_id, e);
                next = ctx.player.discard_head(guild_id).await.map(|t| (t, true));
                first_failure.get_or_insert(e);
            }
        }
    }

    match first_failure {
        None => Ok(()),
        Some(e) => Err(e),
    }
}

/// Start the given track on the call and wire up the end notifier. With
/// `announce` set, the control message is replaced as well; a song replay
/// keeps the existing one.
async fn start_track(
    ctx: &PlaybackContext,
    call: &Arc<Mutex<Call>>,
    guild_id: GuildId,
    track: &Track,
    announce: bool,
) -> Result<(), PlayerError> {
    let input = YoutubeDl::new(ctx.http_client.clone(), track.url.clone());
    let handle = {
        let mut driver = call.lock().await;
        driver.play_only(input.into())
    };

    handle.add_event(
        Event::Track(TrackEvent::End),
        TrackEndNotifier {
            guild_id,
            ctx: ctx.clone(),
            call: call.clone(),
        },
    )?;
    ctx.player.set_handle(guild_id, handle).await;

    if announce {
        if let Some(snapshot) = ctx.player.snapshot(guild_id).await {
            let refresh = now_playing::replace_panel(
                &ctx.sessions,
                ctx.messenger.as_ref(),
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
    }

    Ok(())
}

/// Fires once per track when it stops for any reason, including a stop
/// issued by a skip request. The queue decides what that stop meant.
struct TrackEndNotifier {
    guild_id: GuildId,
    ctx: PlaybackContext,
    call: Arc<Mutex<Call>>,
}

#[async_trait]
impl EventHandler for TrackEndNotifier {
    async fn act(&self, _event: &EventContext<'_>) -> Option<Event> {
        let guild_id = self.guild_id;
        let ctx = self.ctx.clone();
        let call = self.call.clone();

        tokio::spawn(async move {
            advance_playback(ctx, call, guild_id).await;
        });

        None
    }
}

async fn advance_playback(ctx: PlaybackContext, call: Arc<Mutex<Call>>, guild_id: GuildId) {
    let (track, announce) = match ctx.player.advance_after_end(guild_id).await {
        Some(Advance::Next(track)) => (track, true),
        Some(Advance::Replay(track)) => (track, false),
        Some(Advance::Finished) => {
            debug!("Queue finished for guild {}", guild_id);
            return;
        }
        None => {
            debug!("Track ended with no active queue for guild {}", guild_id);
            return;
        }
    };

    // Capture the reply channel first: a failed start can tear the queue
    // down before the notice goes out.
    let text_channel = ctx.player.snapshot(guild_id).await.map(|s| s.text_channel);

    if let Err(e) = start_head(&ctx, &call, guild_id, track, announce).await {
        report_playback_failure(&ctx, guild_id, text_channel, &e).await;
    }
}

async fn report_playback_failure(
    ctx: &PlaybackContext,
    guild_id: GuildId,
    channel: Option<ChannelId>,
    error: &PlayerError,
) {
    error!("Playback failed for guild {}: {}", guild_id, error);
    let Some(channel) = channel else {
        return;
    };
    let notice = ctx
        .messenger
        .send_text(channel, "Hubo un error durante la reproducción.".to_string())
        .await;
    if let Err(e) = notice {
        warn!("Failed to send the playback error notice: {}", e);
    }
}
