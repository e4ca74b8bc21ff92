// Player facade object
//
// Represents the eventually-constructed provider player. The facade holds
// no reference to the real player object; calls are captured immediately
// and forwarded through the dispatch queue once readiness resolves.

use crate::proxy::{CallFuture, QueuedCall};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use ytp_protocol::{Catalog, PlayerState};
use ytp_runtime::{Error, EventBus, Result};

/// The player facade returned by [`PlayerFactory::create`].
///
/// Every cataloged provider method is available in two forms: dynamically
/// through [`call`](Player::call), and as a typed wrapper. Both capture
/// their arguments at call time and enqueue immediately; the returned
/// future only observes the forwarded result. Calls issued before the
/// provider reports readiness are preserved and execute after it, in the
/// order they were issued. If readiness never arrives, the futures pend
/// indefinitely.
///
/// [`PlayerFactory::create`]: crate::PlayerFactory::create
pub struct Player {
    bus: Arc<EventBus>,
    catalog: Arc<Catalog>,
    calls: mpsc::UnboundedSender<QueuedCall>,
}

impl Player {
    pub(crate) fn new(
        bus: Arc<EventBus>,
        catalog: Arc<Catalog>,
        calls: mpsc::UnboundedSender<QueuedCall>,
    ) -> Self {
        Self {
            bus,
            catalog,
            calls,
        }
    }

    /// Invokes a cataloged provider method by name.
    ///
    /// The method name and arguments are captured synchronously, before the
    /// future is polled; a name outside the active catalog resolves to
    /// [`Error::UnknownMethod`] without being queued.
    pub fn call(&self, method: &str, args: Vec<Value>) -> CallFuture {
        if !self.catalog.has_method(method) {
            return CallFuture::failed(Error::UnknownMethod(method.to_string()));
        }

        let (tx, rx) = oneshot::channel();
        let queued = QueuedCall {
            method: method.to_string(),
            args,
            reply: tx,
        };

        if self.calls.send(queued).is_err() {
            return CallFuture::failed(Error::ChannelClosed);
        }

        CallFuture::new(rx)
    }

    /// Registers a handler for a provider event.
    ///
    /// Handlers run synchronously on emission, in registration order, and
    /// receive the provider's payload untouched. Unknown event names are
    /// accepted and simply never fire.
    pub fn on<F>(&self, event: &str, handler: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.bus.on(event, handler);
    }

    /// Alias for [`on`](Player::on).
    pub fn subscribe<F>(&self, event: &str, handler: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.on(event, handler);
    }

    /// Forwards a call whose provider return value is discarded.
    fn command(&self, method: &str, args: Vec<Value>) -> impl Future<Output = Result<()>> + Send {
        let call = self.call(method, args);
        async move { call.await.map(|_| ()) }
    }

    // Queueing

    /// Cues a video by identifier without starting playback.
    pub fn cue_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("cueVideoById", id_args(video_id, start_seconds))
    }

    /// Loads and plays a video by identifier.
    pub fn load_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("loadVideoById", id_args(video_id, start_seconds))
    }

    /// Cues a video by content URL without starting playback.
    pub fn cue_video_by_url(
        &self,
        media_content_url: &str,
        start_seconds: Option<f64>,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("cueVideoByUrl", id_args(media_content_url, start_seconds))
    }

    /// Loads and plays a video by content URL.
    pub fn load_video_by_url(
        &self,
        media_content_url: &str,
        start_seconds: Option<f64>,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("loadVideoByUrl", id_args(media_content_url, start_seconds))
    }

    /// Cues a playlist without starting playback.
    pub fn cue_playlist(
        &self,
        playlist: &[&str],
        index: Option<u32>,
        start_seconds: Option<f64>,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("cuePlaylist", playlist_args(playlist, index, start_seconds))
    }

    /// Loads a playlist and starts playback.
    pub fn load_playlist(
        &self,
        playlist: &[&str],
        index: Option<u32>,
        start_seconds: Option<f64>,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("loadPlaylist", playlist_args(playlist, index, start_seconds))
    }

    // Playback control

    /// Starts or resumes playback.
    pub fn play_video(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("playVideo", Vec::new())
    }

    /// Pauses playback.
    pub fn pause_video(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("pauseVideo", Vec::new())
    }

    /// Stops playback and cancels loading.
    pub fn stop_video(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("stopVideo", Vec::new())
    }

    /// Seeks to `seconds`; `allow_seek_ahead` permits seeking past the
    /// buffered range.
    pub fn seek_to(
        &self,
        seconds: f64,
        allow_seek_ahead: bool,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("seekTo", vec![json!(seconds), json!(allow_seek_ahead)])
    }

    /// Clears the current video from the player.
    pub fn clear_video(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("clearVideo", Vec::new())
    }

    /// Advances to the next playlist entry.
    pub fn next_video(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("nextVideo", Vec::new())
    }

    /// Returns to the previous playlist entry.
    pub fn previous_video(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("previousVideo", Vec::new())
    }

    /// Plays the playlist entry at `index`.
    pub fn play_video_at(&self, index: u32) -> impl Future<Output = Result<()>> + Send {
        self.command("playVideoAt", vec![json!(index)])
    }

    // Volume

    /// Mutes the player.
    pub fn mute(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("mute", Vec::new())
    }

    /// Unmutes the player.
    pub fn un_mute(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("unMute", Vec::new())
    }

    /// Returns true if the player is muted.
    pub fn is_muted(&self) -> impl Future<Output = Result<bool>> + Send {
        let call = self.call("isMuted", Vec::new());
        async move { parse(call.await?) }
    }

    /// Sets the volume (0-100).
    pub fn set_volume(&self, volume: u32) -> impl Future<Output = Result<()>> + Send {
        self.command("setVolume", vec![json!(volume)])
    }

    /// Returns the current volume (0-100).
    pub fn get_volume(&self) -> impl Future<Output = Result<u32>> + Send {
        let call = self.call("getVolume", Vec::new());
        async move { parse(call.await?) }
    }

    // Sizing

    /// Resizes the embedded player.
    pub fn set_size(&self, width: u32, height: u32) -> impl Future<Output = Result<()>> + Send {
        self.command("setSize", vec![json!(width), json!(height)])
    }

    // Playback rate

    /// Returns the current playback rate.
    pub fn get_playback_rate(&self) -> impl Future<Output = Result<f64>> + Send {
        let call = self.call("getPlaybackRate", Vec::new());
        async move { parse(call.await?) }
    }

    /// Suggests a new playback rate.
    pub fn set_playback_rate(&self, suggested_rate: f64) -> impl Future<Output = Result<()>> + Send {
        self.command("setPlaybackRate", vec![json!(suggested_rate)])
    }

    /// Returns the playback rates available for the current video.
    pub fn get_available_playback_rates(&self) -> impl Future<Output = Result<Vec<f64>>> + Send {
        let call = self.call("getAvailablePlaybackRates", Vec::new());
        async move { parse(call.await?) }
    }

    // Playlist behavior

    /// Sets whether the playlist loops.
    pub fn set_loop(&self, loop_playlists: bool) -> impl Future<Output = Result<()>> + Send {
        self.command("setLoop", vec![json!(loop_playlists)])
    }

    /// Sets whether the playlist is shuffled.
    pub fn set_shuffle(&self, shuffle_playlist: bool) -> impl Future<Output = Result<()>> + Send {
        self.command("setShuffle", vec![json!(shuffle_playlist)])
    }

    // Playback status

    /// Returns the fraction of the video the player has buffered.
    pub fn get_video_loaded_fraction(&self) -> impl Future<Output = Result<f64>> + Send {
        let call = self.call("getVideoLoadedFraction", Vec::new());
        async move { parse(call.await?) }
    }

    /// Returns the player's current playback state.
    pub fn get_player_state(&self) -> impl Future<Output = Result<PlayerState>> + Send {
        let call = self.call("getPlayerState", Vec::new());
        async move {
            let code: i64 = parse(call.await?)?;
            PlayerState::from_code(code)
                .ok_or_else(|| Error::UnexpectedResponse(format!("unknown player state code {code}")))
        }
    }

    /// Returns the elapsed time in seconds since playback started.
    pub fn get_current_time(&self) -> impl Future<Output = Result<f64>> + Send {
        let call = self.call("getCurrentTime", Vec::new());
        async move { parse(call.await?) }
    }

    // Playback quality

    /// Returns the current playback quality level.
    pub fn get_playback_quality(&self) -> impl Future<Output = Result<String>> + Send {
        let call = self.call("getPlaybackQuality", Vec::new());
        async move { parse(call.await?) }
    }

    /// Suggests a playback quality level.
    pub fn set_playback_quality(
        &self,
        suggested_quality: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("setPlaybackQuality", vec![json!(suggested_quality)])
    }

    /// Returns the quality levels available for the current video.
    pub fn get_available_quality_levels(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        let call = self.call("getAvailableQualityLevels", Vec::new());
        async move { parse(call.await?) }
    }

    // Video information

    /// Returns the duration of the current video in seconds.
    pub fn get_duration(&self) -> impl Future<Output = Result<f64>> + Send {
        let call = self.call("getDuration", Vec::new());
        async move { parse(call.await?) }
    }

    /// Returns the URL of the current video.
    pub fn get_video_url(&self) -> impl Future<Output = Result<String>> + Send {
        let call = self.call("getVideoUrl", Vec::new());
        async move { parse(call.await?) }
    }

    /// Returns the embed code for the current video.
    pub fn get_video_embed_code(&self) -> impl Future<Output = Result<String>> + Send {
        let call = self.call("getVideoEmbedCode", Vec::new());
        async move { parse(call.await?) }
    }

    // Playlist information

    /// Returns the video identifiers in the current playlist.
    pub fn get_playlist(&self) -> impl Future<Output = Result<Vec<String>>> + Send {
        let call = self.call("getPlaylist", Vec::new());
        async move { parse(call.await?) }
    }

    /// Returns the index of the playing playlist entry.
    pub fn get_playlist_index(&self) -> impl Future<Output = Result<u32>> + Send {
        let call = self.call("getPlaylistIndex", Vec::new());
        async move { parse(call.await?) }
    }

    // Provider listeners and lifecycle

    /// Registers a provider-side listener function for an event.
    pub fn add_event_listener(
        &self,
        event: &str,
        listener: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("addEventListener", vec![json!(event), json!(listener)])
    }

    /// Removes a provider-side listener function for an event.
    pub fn remove_event_listener(
        &self,
        event: &str,
        listener: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        self.command("removeEventListener", vec![json!(event), json!(listener)])
    }

    /// Returns the host element handle the provider mounted into.
    pub fn get_iframe(&self) -> CallFuture {
        self.call("getIframe", Vec::new())
    }

    /// Destroys the real player and its host element.
    pub fn destroy(&self) -> impl Future<Output = Result<()>> + Send {
        self.command("destroy", Vec::new())
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("methods", &self.catalog.methods().len())
            .finish()
    }
}

fn parse<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::from)
}

fn id_args(identifier: &str, start_seconds: Option<f64>) -> Vec<Value> {
    let mut args = vec![json!(identifier)];
    if let Some(start) = start_seconds {
        args.push(json!(start));
    }
    args
}

fn playlist_args(playlist: &[&str], index: Option<u32>, start_seconds: Option<f64>) -> Vec<Value> {
    let mut args = vec![json!(playlist)];
    match (index, start_seconds) {
        (None, None) => {}
        (Some(index), None) => args.push(json!(index)),
        (index, Some(start)) => {
            args.push(index.map_or(Value::Null, |i| json!(i)));
            args.push(json!(start));
        }
    }
    args
}
