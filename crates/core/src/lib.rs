//! ytp: a deferred facade over the embedded video player provider.
//!
//! The provider is a widget runtime injected into the host page by an
//! external script. This crate loads that script once per process, wraps
//! the eventually-constructed player so callers can invoke methods before
//! the underlying object exists, and normalizes the provider's callbacks
//! into a subscribe-style event surface.
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//! use ytp::{PlayerFactory, PlayerOptions, PlayerVars};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // `host` is whatever bridges this process to the page: a webview
//!     // shim, a wasm binding, or a mock in tests.
//!     let factory = PlayerFactory::new(host);
//!
//!     let player = factory.create(
//!         "video-player",
//!         PlayerOptions::new()
//!             .width(640)
//!             .height(360)
//!             .video_id("M7lc1UVf-VE")
//!             .player_vars(PlayerVars::new().autoplay(true)),
//!     )?;
//!
//!     // Calls issued before the provider reports readiness are queued and
//!     // forwarded in order once the real player exists.
//!     player.play_video().await?;
//!     let duration = player.get_duration().await?;
//!     println!("duration: {duration}");
//!
//!     player.on("stateChange", |event| {
//!         println!("state changed: {event}");
//!     });
//!
//!     Ok(())
//! }
//! ```

mod factory;
mod player;
mod proxy;

pub use factory::PlayerFactory;
pub use player::Player;
pub use proxy::{CallFuture, proxy_events};

// Re-export the protocol and runtime layers for embedders
pub use ytp_protocol;
pub use ytp_runtime;

// Re-export the types most callers need at the crate root
pub use ytp_protocol::{
    Catalog, ElementTarget, PlayerError, PlayerOptions, PlayerState, PlayerVars, handler_slot,
};
pub use ytp_runtime::{
    Deferred, Error, EventBus, EventSlots, HostEnvironment, PlayerHandle, Provider, ProviderLoader,
    Result,
};
