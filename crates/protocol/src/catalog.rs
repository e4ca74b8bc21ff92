//! Event and method name catalogs.
//!
//! The provider exposes a fixed set of lifecycle events and player methods.
//! Both sets are data, not logic: the core iterates over whatever catalog it
//! is given, so a provider revision that adds or removes names only requires
//! a different [`Catalog`] value, never a code change.

use serde::{Deserialize, Serialize};

/// Events the provider reports through its handler slots.
///
/// Matches the provider surface this repository targets; the order is the
/// order in which handler slots are generated.
pub const EVENT_NAMES: &[&str] = &[
    "ready",
    "stateChange",
    "playbackQualityChange",
    "playbackRateChange",
    "error",
    "apiChange",
];

/// Methods exposed by a constructed player object.
pub const METHOD_NAMES: &[&str] = &[
    "cueVideoById",
    "loadVideoById",
    "cueVideoByUrl",
    "loadVideoByUrl",
    "cuePlaylist",
    "loadPlaylist",
    "playVideo",
    "pauseVideo",
    "stopVideo",
    "seekTo",
    "clearVideo",
    "nextVideo",
    "previousVideo",
    "playVideoAt",
    "mute",
    "unMute",
    "isMuted",
    "setVolume",
    "getVolume",
    "setSize",
    "getPlaybackRate",
    "setPlaybackRate",
    "getAvailablePlaybackRates",
    "setLoop",
    "setShuffle",
    "getVideoLoadedFraction",
    "getPlayerState",
    "getCurrentTime",
    "getPlaybackQuality",
    "setPlaybackQuality",
    "getAvailableQualityLevels",
    "getDuration",
    "getVideoUrl",
    "getVideoEmbedCode",
    "getPlaylist",
    "getPlaylistIndex",
    "addEventListener",
    "removeEventListener",
    "getIframe",
    "destroy",
];

/// Derives the provider's handler-slot name for an event.
///
/// The provider expects one configuration key per event, named `"on"` plus
/// the event name with its first character upper-cased: `stateChange`
/// becomes `onStateChange`.
pub fn handler_slot(event: &str) -> String {
    let mut chars = event.chars();
    match chars.next() {
        Some(first) => format!("on{}{}", first.to_uppercase(), chars.as_str()),
        None => "on".to_string(),
    }
}

/// The ordered event and method name lists the core proxies.
///
/// A catalog is plain data injected into the player factory. The default
/// value describes the provider version this repository is built against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    events: Vec<String>,
    methods: Vec<String>,
}

impl Catalog {
    /// Creates a catalog from explicit name lists.
    pub fn new(events: Vec<String>, methods: Vec<String>) -> Self {
        Self { events, methods }
    }

    /// Event names, in slot-generation order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Method names, in facade-generation order.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Returns true if `name` is a cataloged event.
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e == name)
    }

    /// Returns true if `name` is a cataloged method.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            events: EVENT_NAMES.iter().map(|s| s.to_string()).collect(),
            methods: METHOD_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
