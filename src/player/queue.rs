use std::collections::VecDeque;

use rand::seq::SliceRandom;
use serenity::all::ChannelId;
use songbird::tracks::TrackHandle;

use super::{RepeatMode, Track};

/// Why the current track stopped playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The track ran to completion.
    Ended,
    /// A skip was requested and the track was stopped.
    Skipped,
}

/// What the audio driver should do after a track ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Play this track and announce it with a fresh control message.
    Next(Track),
    /// Play this track again without touching the control message.
    Replay(Track),
    /// Nothing left to play.
    Finished,
}

/// Queue state for one guild. Exists exactly while something is playing:
/// the front track is always the one on the wire.
pub struct GuildQueue {
    pub tracks: VecDeque<Track>,
    pub paused: bool,
    pub repeat: RepeatMode,
    /// Channel the last play request came from; playback notices go here.
    pub text_channel: ChannelId,
    pub handle: Option<TrackHandle>,
    /// Set by a skip request, consumed by the next advance.
    pub skip_requested: bool,
}

impl GuildQueue {
    pub fn new(first: Track, text_channel: ChannelId) -> Self {
        let mut tracks = VecDeque::new();
        tracks.push_back(first);
        Self {
            tracks,
            paused: false,
            repeat: RepeatMode::Off,
            text_channel,
            handle: None,
            skip_requested: false,
        }
    }

    /// Append a track and return its 1-based queue position.
    pub fn push(&mut self, track: Track) -> usize {
        self.tracks.push_back(track);
        self.tracks.len()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn head(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// Move past the front track according to the repeat mode. A natural end
    /// under song repeat replays the head; queue repeat rotates the finished
    /// track to the back; otherwise the head is dropped. A skip always moves
    /// on, even under song repeat.
    pub fn advance(&mut self, reason: EndReason) -> Advance {
        self.paused = false;
        self.handle = None;

        match (reason, self.repeat) {
            (EndReason::Ended, RepeatMode::Song) => match self.tracks.front() {
                Some(track) => Advance::Replay(track.clone()),
                None => Advance::Finished,
            },
            (_, RepeatMode::Queue) => {
                if let Some(finished) = self.tracks.pop_front() {
                    self.tracks.push_back(finished);
                }
                match self.tracks.front() {
                    Some(track) => Advance::Next(track.clone()),
                    None => Advance::Finished,
                }
            }
            _ => {
                self.tracks.pop_front();
                match self.tracks.front() {
                    Some(track) => Advance::Next(track.clone()),
                    None => Advance::Finished,
                }
            }
        }
    }

    /// Shuffle everything behind the playing head.
    pub fn shuffle_upcoming(&mut self) {
        let tracks = self.tracks.make_contiguous();
        if tracks.len() > 2 {
            tracks[1..].shuffle(&mut rand::rng());
        }
    }

    /// Remove the track at a 0-based index, refusing the playing head.
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        if index == 0 || index >= self.tracks.len() {
            return None;
        }
        self.tracks.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    fn track(title: &str) -> Track {
        Track {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            duration: None,
            thumbnail: None,
            requested_by: "<@1>".to_string(),
            views: None,
            likes: None,
        }
    }

    fn queue_of(titles: &[&str]) -> GuildQueue {
        let mut queue = GuildQueue::new(track(titles[0]), ChannelId::new(70));
        for title in &titles[1..] {
            queue.push(track(title));
        }
        queue
    }

    fn titles(queue: &GuildQueue) -> Vec<String> {
        queue.tracks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn natural_end_without_repeat_drops_the_head() {
        let mut queue = queue_of(&["a", "b"]);
        assert_matches!(queue.advance(EndReason::Ended), Advance::Next(t) if t.title == "b");
        assert_eq!(titles(&queue), vec!["b"]);
    }

    #[test]
    fn natural_end_of_the_last_track_finishes() {
        let mut queue = queue_of(&["a"]);
        assert_matches!(queue.advance(EndReason::Ended), Advance::Finished);
        assert!(queue.is_empty());
    }

    #[test]
    fn song_repeat_replays_the_same_head() {
        let mut queue = queue_of(&["a", "b"]);
        queue.repeat = RepeatMode::Song;
        assert_matches!(queue.advance(EndReason::Ended), Advance::Replay(t) if t.title == "a");
        assert_eq!(titles(&queue), vec!["a", "b"]);
    }

    #[test]
    fn skip_overrides_song_repeat() {
        let mut queue = queue_of(&["a", "b"]);
        queue.repeat = RepeatMode::Song;
        assert_matches!(queue.advance(EndReason::Skipped), Advance::Next(t) if t.title == "b");
        assert_eq!(titles(&queue), vec!["b"]);
    }

    #[test_case(EndReason::Ended; "natural end")]
    #[test_case(EndReason::Skipped; "skip")]
    fn queue_repeat_rotates_the_finished_track(reason: EndReason) {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.repeat = RepeatMode::Queue;
        assert_matches!(queue.advance(reason), Advance::Next(t) if t.title == "b");
        assert_eq!(titles(&queue), vec!["b", "c", "a"]);
    }

    #[test]
    fn queue_repeat_with_one_track_keeps_playing_it() {
        let mut queue = queue_of(&["a"]);
        queue.repeat = RepeatMode::Queue;
        assert_matches!(queue.advance(EndReason::Ended), Advance::Next(t) if t.title == "a");
        assert_eq!(titles(&queue), vec!["a"]);
    }

    #[test]
    fn advance_clears_the_pause_flag() {
        let mut queue = queue_of(&["a", "b"]);
        queue.paused = true;
        queue.advance(EndReason::Skipped);
        assert!(!queue.paused);
    }

    #[test]
    fn shuffle_leaves_the_head_and_the_rest_intact_as_a_set() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e"]);
        queue.shuffle_upcoming();

        assert_eq!(queue.head().map(|t| t.title.as_str()), Some("a"));
        let mut rest: Vec<_> = titles(&queue)[1..].to_vec();
        rest.sort();
        assert_eq!(rest, vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn remove_at_rejects_head_and_out_of_bounds() {
        let mut queue = queue_of(&["a", "b", "c"]);
        assert!(queue.remove_at(0).is_none());
        assert!(queue.remove_at(3).is_none());
        assert_eq!(queue.remove_at(1).map(|t| t.title), Some("b".to_string()));
        assert_eq!(titles(&queue), vec!["a", "c"]);
    }
}
