use std::sync::Arc;

pub mod commands;
pub mod config;
pub mod controls;
pub mod events;
pub mod messenger;
pub mod player;
pub mod sessions;
pub mod ui;

use config::Config;
use messenger::Messenger;
use player::Player;
use sessions::Sessions;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// Shared state handed to every command and event handler.
pub struct Data {
    pub config: Config,
    pub sessions: Arc<Sessions>,
    pub player: Arc<Player>,
    pub messenger: Arc<dyn Messenger>,
    pub http_client: reqwest::Client,
}

impl Data {
    pub fn new(config: Config, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            config,
            sessions: Arc::new(Sessions::new()),
            player: Arc::new(Player::new()),
            messenger,
            http_client: reqwest::Client::new(),
        }
    }

    /// Bundle of handles the audio driver carries into its end notifier.
    pub fn playback_context(&self) -> player::playback::PlaybackContext {
        player::playback::PlaybackContext {
            player: self.player.clone(),
            sessions: self.sessions.clone(),
            messenger: self.messenger.clone(),
            http_client: self.http_client.clone(),
        }
    }
}
