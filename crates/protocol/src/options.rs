//! Configuration objects for player construction.
//!
//! These types represent the options object handed to the provider's player
//! constructor. They are designed for serialization to the provider's JSON
//! configuration shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Player construction options.
///
/// The `events` slot is owned by the event proxy: the factory installs its
/// generated handler map there and rejects configurations that already carry
/// one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOptions {
    /// Width of the embedded player, in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Height of the embedded player, in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Identifier of the video to load into the player.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    /// Provider-specific nested playback options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_vars: Option<PlayerVars>,

    /// Provider event-handler slots. Reserved for the event proxy; a caller
    /// supplying this map fails construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Map<String, Value>>,
}

impl PlayerOptions {
    /// Creates new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the player width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the player height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the video to load.
    pub fn video_id(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    /// Sets the nested playback options.
    pub fn player_vars(mut self, player_vars: PlayerVars) -> Self {
        self.player_vars = Some(player_vars);
        self
    }
}

/// The provider's nested `playerVars` options.
///
/// Common keys are typed; anything else rides along in `extra` untouched.
/// Field names follow the provider's wire spelling, which mixes camelCase
/// and snake_case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerVars {
    /// Start playback automatically (0 or 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<u8>,

    /// Show player controls (0 or 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<u8>,

    /// Disable keyboard controls (0 or 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disablekb: Option<u8>,

    /// Playback start offset, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    /// Playback end offset, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,

    /// Loop the video or playlist (0 or 1).
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loop_: Option<u8>,

    /// Interface language hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,

    /// Comma-separated list of video identifiers to play after `videoId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<String>,

    /// Play inline on mobile rather than fullscreen (0 or 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playsinline: Option<u8>,

    /// Show related videos when playback ends (0 or 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<u8>,

    /// Origin of the embedding page, for provider-side validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Any provider options without a typed field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerVars {
    /// Creates new default playback options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets autoplay.
    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = Some(autoplay as u8);
        self
    }

    /// Sets controls visibility.
    pub fn controls(mut self, controls: bool) -> Self {
        self.controls = Some(controls as u8);
        self
    }

    /// Sets the start offset in seconds.
    pub fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end offset in seconds.
    pub fn end(mut self, end: u32) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets looping.
    pub fn looping(mut self, looping: bool) -> Self {
        self.loop_ = Some(looping as u8);
        self
    }

    /// Sets the follow-on playlist.
    pub fn playlist(mut self, playlist: impl Into<String>) -> Self {
        self.playlist = Some(playlist.into());
        self
    }

    /// Sets the embedding origin.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets an untyped provider option.
    pub fn set(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
