//! Provider-side value types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the provider should mount the player.
///
/// Either the identifier of an existing host element, or an opaque element
/// handle already held by the caller (host-specific; passed through
/// untouched).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementTarget {
    /// Identifier of an element in the host document.
    Id(String),
    /// Opaque host element handle.
    Node(Value),
}

impl ElementTarget {
    /// Returns the element identifier, if this target is one.
    pub fn id(&self) -> Option<&str> {
        match self {
            ElementTarget::Id(id) => Some(id),
            ElementTarget::Node(_) => None,
        }
    }
}

impl From<&str> for ElementTarget {
    fn from(id: &str) -> Self {
        ElementTarget::Id(id.to_string())
    }
}

impl From<String> for ElementTarget {
    fn from(id: String) -> Self {
        ElementTarget::Id(id)
    }
}

/// Playback states reported by `getPlayerState` and `stateChange` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Playback has not started.
    Unstarted,
    /// Playback finished.
    Ended,
    /// Actively playing.
    Playing,
    /// Paused by the user or a method call.
    Paused,
    /// Buffering before or during playback.
    Buffering,
    /// A video is cued and ready to play.
    Cued,
}

impl PlayerState {
    /// Maps a provider state code to a state, if recognized.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    /// The provider's numeric code for this state.
    pub fn as_code(self) -> i64 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
            Self::Cued => 5,
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unstarted => write!(f, "unstarted"),
            Self::Ended => write!(f, "ended"),
            Self::Playing => write!(f, "playing"),
            Self::Paused => write!(f, "paused"),
            Self::Buffering => write!(f, "buffering"),
            Self::Cued => write!(f, "cued"),
        }
    }
}

/// Failure codes carried by the provider's `error` event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerError {
    /// The request contained an invalid parameter value.
    InvalidParameter,
    /// The requested content cannot be played in an HTML5 player.
    Html5Error,
    /// The requested video was not found.
    VideoNotFound,
    /// The video's owner does not allow embedded playback.
    NotEmbeddable,
}

impl PlayerError {
    /// Maps a provider error code to an error, if recognized.
    ///
    /// The provider reports not-embeddable content under two codes (101 and
    /// 150); both map to [`PlayerError::NotEmbeddable`].
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(Self::InvalidParameter),
            5 => Some(Self::Html5Error),
            100 => Some(Self::VideoNotFound),
            101 | 150 => Some(Self::NotEmbeddable),
            _ => None,
        }
    }
}
