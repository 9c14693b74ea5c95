use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serenity::all::{ChannelId, GuildId};
use songbird::tracks::TrackHandle;
use thiserror::Error;
use tokio::sync::Mutex;

pub mod playback;
pub mod queue;
pub mod source;

pub use queue::{Advance, EndReason, GuildQueue};

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("failed to launch yt-dlp: {0}")]
    ResolverLaunch(#[from] std::io::Error),
    #[error("yt-dlp failed: {0}")]
    ResolverFailed(String),
    #[error("could not parse track metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("failed to join the voice channel: {0}")]
    Join(#[from] songbird::error::JoinError),
    #[error("voice manager is not available")]
    VoiceUnavailable,
    #[error("audio control failed: {0}")]
    Audio(#[from] songbird::error::ControlError),
}

/// A resolved track, ready to queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub title: String,
    pub url: String,
    pub duration: Option<Duration>,
    pub thumbnail: Option<String>,
    /// Mention of the member who requested the track.
    pub requested_by: String,
    pub views: Option<u64>,
    pub likes: Option<u64>,
}

/// Tri-state looping policy of a guild queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, poise::ChoiceParameter)]
pub enum RepeatMode {
    #[default]
    #[name = "Off"]
    Off,
    #[name = "Canción"]
    Song,
    #[name = "Cola"]
    Queue,
}

impl RepeatMode {
    /// Next mode in the button cycle: off → song → queue → off.
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::Song,
            Self::Song => Self::Queue,
            Self::Queue => Self::Off,
        }
    }

    /// Text-command argument form.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "off" => Some(Self::Off),
            "song" => Some(Self::Song),
            "queue" => Some(Self::Queue),
            _ => None,
        }
    }

    /// Label used in the control-message field.
    pub fn panel_label(self) -> &'static str {
        match self {
            Self::Off => "Desactivado",
            Self::Song => "Bucle de Canción",
            Self::Queue => "Bucle de Cola",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Off => "desactivado",
            Self::Song => "Bucle de canción",
            Self::Queue => "Bucle de cola",
        };
        f.write_str(label)
    }
}

/// Point-in-time copy of a guild queue for rendering and prechecks.
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    pub tracks: Vec<Track>,
    pub paused: bool,
    pub repeat: RepeatMode,
    pub text_channel: ChannelId,
}

/// Result of adding a track to a guild queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enqueued {
    /// 1-based position in the queue.
    pub position: usize,
    /// True when the queue was empty and playback must be started.
    pub started: bool,
}

/// Owner of every guild queue. All mutations go through here; the audio
/// driver and the control facade share it behind an `Arc`.
#[derive(Default)]
pub struct Player {
    queues: Mutex<HashMap<GuildId, GuildQueue>>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track, creating the guild queue when none exists. The bound
    /// reply channel follows the latest request.
    pub async fn enqueue(
        &self,
        guild_id: GuildId,
        track: Track,
        text_channel: ChannelId,
    ) -> Enqueued {
        let mut queues = self.queues.lock().await;
        match queues.get_mut(&guild_id) {
            Some(queue) => {
                queue.text_channel = text_channel;
                let position = queue.push(track);
                Enqueued {
                    position,
                    started: false,
                }
            }
            None => {
                queues.insert(guild_id, GuildQueue::new(track, text_channel));
                Enqueued {
                    position: 1,
                    started: true,
                }
            }
        }
    }

    pub async fn snapshot(&self, guild_id: GuildId) -> Option<QueueSnapshot> {
        let queues = self.queues.lock().await;
        queues.get(&guild_id).map(|queue| QueueSnapshot {
            tracks: queue.tracks.iter().cloned().collect(),
            paused: queue.paused,
            repeat: queue.repeat,
            text_channel: queue.text_channel,
        })
    }

    /// Pause or resume the current track. A missing queue is a no-op; the
    /// facade prechecks and the window in between is accepted.
    pub async fn set_paused(&self, guild_id: GuildId, paused: bool) -> Result<(), PlayerError> {
        let mut queues = self.queues.lock().await;
        let Some(queue) = queues.get_mut(&guild_id) else {
            return Ok(());
        };
        if let Some(handle) = &queue.handle {
            if paused {
                handle.pause()?;
            } else {
                handle.play()?;
            }
        }
        queue.paused = paused;
        Ok(())
    }

    /// Apply an explicit repeat mode, or cycle to the next one when `None`.
    /// Returns the resulting mode, or `None` without an active queue.
    pub async fn set_repeat(
        &self,
        guild_id: GuildId,
        mode: Option<RepeatMode>,
    ) -> Option<RepeatMode> {
        let mut queues = self.queues.lock().await;
        let queue = queues.get_mut(&guild_id)?;
        let applied = mode.unwrap_or_else(|| queue.repeat.next());
        queue.repeat = applied;
        Some(applied)
    }

    /// Shuffle the tracks behind the playing head. Returns false without an
    /// active queue.
    pub async fn shuffle(&self, guild_id: GuildId) -> bool {
        let mut queues = self.queues.lock().await;
        match queues.get_mut(&guild_id) {
            Some(queue) => {
                queue.shuffle_upcoming();
                true
            }
            None => false,
        }
    }

    /// Remove the track at a 1-based position. The playing head (position 1)
    /// is never removed.
    pub async fn remove(&self, guild_id: GuildId, position: usize) -> Option<Track> {
        let mut queues = self.queues.lock().await;
        let queue = queues.get_mut(&guild_id)?;
        queue.remove_at(position.checked_sub(1)?)
    }

    /// Latch a skip and stop the current track; the end notifier does the
    /// actual advance. Returns false without an active queue.
    pub async fn request_skip(&self, guild_id: GuildId) -> Result<bool, PlayerError> {
        let mut queues = self.queues.lock().await;
        let Some(queue) = queues.get_mut(&guild_id) else {
            return Ok(false);
        };
        queue.skip_requested = true;
        if let Some(handle) = &queue.handle {
            handle.stop()?;
        }
        Ok(true)
    }

    /// Tear down and return the guild queue, if any. Stopping the returned
    /// handle fires a track-end event that finds no queue and does nothing.
    pub async fn take_queue(&self, guild_id: GuildId) -> Option<GuildQueue> {
        self.queues.lock().await.remove(&guild_id)
    }

    /// Advance the queue after a track ended, applying the repeat rules and
    /// consuming a latched skip. Removes the queue entry when it finished.
    pub async fn advance_after_end(&self, guild_id: GuildId) -> Option<Advance> {
        let mut queues = self.queues.lock().await;
        let queue = queues.get_mut(&guild_id)?;
        let reason = if std::mem::take(&mut queue.skip_requested) {
            EndReason::Skipped
        } else {
            EndReason::Ended
        };
        let step = queue.advance(reason);
        if matches!(step, Advance::Finished) {
            queues.remove(&guild_id);
        }
        Some(step)
    }

    /// Drop a head that never made it onto the wire so the queue does not
    /// stall behind it. Repeat rules and a latched skip do not apply to a
    /// track that never played. Returns the next head to try; the entry is
    /// removed when nothing remains.
    pub async fn discard_head(&self, guild_id: GuildId) -> Option<Track> {
        let mut queues = self.queues.lock().await;
        let queue = queues.get_mut(&guild_id)?;
        queue.skip_requested = false;
        queue.paused = false;
        queue.handle = None;
        queue.tracks.pop_front();
        if let Some(next) = queue.tracks.front() {
            return Some(next.clone());
        }
        queues.remove(&guild_id);
        None
    }

    /// Attach the live track handle for the queue head.
    pub async fn set_handle(&self, guild_id: GuildId, handle: TrackHandle) {
        if let Some(queue) = self.queues.lock().await.get_mut(&guild_id) {
            queue.handle = Some(handle);
        }
    }
}
