//! End-to-end facade tests against a recording mock provider.

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use ytp::ytp_runtime::BoxFuture;
use ytp::{
    ElementTarget, Error, EventSlots, HostEnvironment, PlayerFactory, PlayerHandle, PlayerOptions,
    PlayerState, Provider, Result,
};

/// Scripted outcome for one mock player method.
enum Outcome {
    Value(Value),
    Fail { name: String, message: String },
}

/// Records every forwarded call and replays scripted outcomes.
struct MockHandle {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    outcomes: Mutex<HashMap<String, Outcome>>,
}

impl MockHandle {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcomes: Mutex::new(HashMap::new()),
        }
    }

    fn returns(&self, method: &str, value: Value) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(method.to_string(), Outcome::Value(value));
    }

    fn fails(&self, method: &str, name: &str, message: &str) {
        self.outcomes.lock().unwrap().insert(
            method.to_string(),
            Outcome::Fail {
                name: name.to_string(),
                message: message.to_string(),
            },
        );
    }

    fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PlayerHandle for MockHandle {
    fn call(&self, method: &str, args: Vec<Value>) -> BoxFuture<'_, Result<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), args));

        let result = match self.outcomes.lock().unwrap().get(method) {
            Some(Outcome::Value(value)) => Ok(value.clone()),
            Some(Outcome::Fail { name, message }) => Err(Error::Player {
                name: name.clone(),
                message: message.clone(),
            }),
            None => Ok(Value::Null),
        };

        Box::pin(async move { result })
    }
}

/// One constructed mock player: its handle and the slots it was given.
struct Constructed {
    handle: Arc<MockHandle>,
    slots: EventSlots,
    target: ElementTarget,
    config: Value,
}

#[derive(Default)]
struct MockProvider {
    players: Mutex<Vec<Constructed>>,
}

impl MockProvider {
    /// Waits until `count` players have been constructed.
    async fn wait_constructed(&self, count: usize) {
        for _ in 0..100 {
            if self.players.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("provider never constructed {count} player(s)");
    }

    /// Invokes a handler slot of the most recent player, as the provider
    /// would on an event.
    fn fire(&self, slot: &str, payload: Value) {
        let players = self.players.lock().unwrap();
        let player = players.last().expect("no player constructed");
        let handler = Arc::clone(player.slots.get(slot).expect("missing slot"));
        drop(players);
        handler(payload);
    }

    fn handle(&self, index: usize) -> Arc<MockHandle> {
        Arc::clone(&self.players.lock().unwrap()[index].handle)
    }

    fn constructed(&self, index: usize) -> (ElementTarget, Value) {
        let players = self.players.lock().unwrap();
        (players[index].target.clone(), players[index].config.clone())
    }
}

impl Provider for MockProvider {
    fn create_player(
        &self,
        target: ElementTarget,
        config: Value,
        slots: EventSlots,
    ) -> BoxFuture<'_, Result<Arc<dyn PlayerHandle>>> {
        let handle = Arc::new(MockHandle::new());
        self.players.lock().unwrap().push(Constructed {
            handle: Arc::clone(&handle),
            slots,
            target,
            config,
        });
        Box::pin(async move { Ok(handle as Arc<dyn PlayerHandle>) })
    }
}

struct MockHost {
    elements: Vec<String>,
    loads: AtomicUsize,
    provider: Arc<MockProvider>,
}

impl MockHost {
    fn new(elements: &[&str]) -> Self {
        Self {
            elements: elements.iter().map(|s| s.to_string()).collect(),
            loads: AtomicUsize::new(0),
            provider: Arc::new(MockProvider::default()),
        }
    }

    fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl HostEnvironment for MockHost {
    fn element_exists(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e == id)
    }

    fn load_provider(&self) -> BoxFuture<'_, Result<Arc<dyn Provider>>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let provider = Arc::clone(&self.provider) as Arc<dyn Provider>;
        Box::pin(async move { Ok(provider) })
    }
}

fn fixture(elements: &[&str]) -> (Arc<MockHost>, PlayerFactory) {
    let host = Arc::new(MockHost::new(elements));
    let factory = PlayerFactory::new(Arc::clone(&host) as Arc<dyn HostEnvironment>);
    (host, factory)
}

#[tokio::test]
async fn events_in_options_fail_synchronously() {
    let (host, factory) = fixture(&["player"]);

    let mut options = PlayerOptions::new().video_id("abc");
    options.events = Some(serde_json::Map::new());

    let err = factory.create("player", options).unwrap_err();
    assert!(matches!(err, Error::EventsOverride));
    assert_eq!(err.to_string(), "Event handlers cannot be overwritten.");

    // Validation happened before any asynchronous work.
    assert!(!factory.loader().is_triggered());
    assert_eq!(host.load_count(), 0);
}

#[tokio::test]
async fn missing_element_fails_without_triggering_the_loader() {
    let (host, factory) = fixture(&["player"]);

    let err = factory
        .create("missing-id", PlayerOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::ElementNotFound(ref id) if id == "missing-id"));
    assert_eq!(err.to_string(), "Element \"#missing-id\" does not exist.");

    assert!(!factory.loader().is_triggered());
    assert_eq!(host.load_count(), 0);
}

#[tokio::test]
async fn node_targets_skip_element_lookup() {
    let (host, factory) = fixture(&[]);

    let target = ElementTarget::Node(json!({"node": 1}));
    let player = factory.create(target, PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    host.provider.fire("onReady", Value::Null);
    player.play_video().await.unwrap();
}

#[tokio::test]
async fn two_players_share_one_script_load() {
    let (host, factory) = fixture(&["a", "b"]);

    let first = factory.create("a", PlayerOptions::new()).unwrap();
    let second = factory.create("b", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(2).await;

    assert_eq!(host.load_count(), 1);

    // Both facades are live against their own players.
    let ready_handlers: Vec<_> = {
        let players = host.provider.players.lock().unwrap();
        players
            .iter()
            .map(|p| Arc::clone(p.slots.get("onReady").unwrap()))
            .collect()
    };
    for handler in ready_handlers {
        handler(Value::Null);
    }

    first.play_video().await.unwrap();
    second.play_video().await.unwrap();
}

#[tokio::test]
async fn construction_passes_target_and_config_through() {
    let (host, factory) = fixture(&["video-player"]);

    let _player = factory
        .create(
            "video-player",
            PlayerOptions::new().width(640).height(360).video_id("M7lc1UVf-VE"),
        )
        .unwrap();
    host.provider.wait_constructed(1).await;

    let (target, config) = host.provider.constructed(0);
    assert_eq!(target.id(), Some("video-player"));
    assert_eq!(
        config,
        json!({"width": 640, "height": 360, "videoId": "M7lc1UVf-VE"})
    );
}

#[tokio::test]
async fn calls_before_ready_are_queued_in_order() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;
    let handle = host.provider.handle(0);

    let play = player.play_video();
    let pause = player.pause_video();

    // The real player exists but has not reported ready: nothing may have
    // been forwarded yet.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(handle.calls().is_empty());

    host.provider.fire("onReady", json!({"target": null}));

    play.await.unwrap();
    pause.await.unwrap();

    let calls = handle.calls();
    assert_eq!(
        calls,
        vec![
            ("playVideo".to_string(), vec![]),
            ("pauseVideo".to_string(), vec![]),
        ]
    );
}

#[tokio::test]
async fn arguments_are_captured_at_call_time() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    let seek = player.seek_to(633.2, true);
    let load = player.load_video_by_id("M7lc1UVf-VE", Some(12.0));
    host.provider.fire("onReady", Value::Null);
    seek.await.unwrap();
    load.await.unwrap();

    let calls = host.provider.handle(0).calls();
    assert_eq!(
        calls,
        vec![
            ("seekTo".to_string(), vec![json!(633.2), json!(true)]),
            (
                "loadVideoById".to_string(),
                vec![json!("M7lc1UVf-VE"), json!(12.0)]
            ),
        ]
    );
}

#[tokio::test]
async fn forwarding_failure_rejects_only_its_own_call() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    let handle = host.provider.handle(0);
    handle.fails("getDuration", "TypeError", "duration unavailable");

    let duration = player.get_duration();
    let play = player.play_video();
    host.provider.fire("onReady", Value::Null);

    match duration.await {
        Err(Error::Player { name, message }) => {
            assert_eq!(name, "TypeError");
            assert_eq!(message, "duration unavailable");
        }
        other => panic!("expected forwarded failure, got {other:?}"),
    }

    // The concurrently pending call is unaffected.
    play.await.unwrap();
}

#[tokio::test]
async fn typed_wrappers_deserialize_provider_results() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    let handle = host.provider.handle(0);
    handle.returns("getDuration", json!(642.5));
    handle.returns("getVolume", json!(70));
    handle.returns("isMuted", json!(false));
    handle.returns("getPlayerState", json!(1));
    handle.returns("getPlaylist", json!(["a", "b", "c"]));

    host.provider.fire("onReady", Value::Null);

    assert_eq!(player.get_duration().await.unwrap(), 642.5);
    assert_eq!(player.get_volume().await.unwrap(), 70);
    assert!(!player.is_muted().await.unwrap());
    assert_eq!(player.get_player_state().await.unwrap(), PlayerState::Playing);
    assert_eq!(
        player.get_playlist().await.unwrap(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[tokio::test]
async fn dynamic_calls_reject_uncataloged_methods() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    let result = player.call("reticulateSplines", vec![]).await;
    assert!(matches!(result, Err(Error::UnknownMethod(ref m)) if m == "reticulateSplines"));

    // The rejected call was never queued.
    host.provider.fire("onReady", Value::Null);
    player.play_video().await.unwrap();
    let calls = host.provider.handle(0).calls();
    assert_eq!(calls, vec![("playVideo".to_string(), vec![])]);
}

#[tokio::test]
async fn provider_events_reach_facade_subscribers() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    player.on("stateChange", move |payload| {
        sink.lock().unwrap().push(payload.clone());
    });

    let payload = json!({"data": PlayerState::Playing.as_code()});
    host.provider.fire("onStateChange", payload.clone());

    assert_eq!(seen.lock().unwrap().as_slice(), [payload]);
}

#[tokio::test]
async fn subscribe_is_an_alias_for_on() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    player.subscribe("error", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    host.provider.fire("onError", json!({"data": 101}));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_second_ready_event_is_ignored() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;

    host.provider.fire("onReady", Value::Null);
    player.play_video().await.unwrap();

    // A re-fired ready leaves the facade bound to the original player.
    host.provider.fire("onReady", Value::Null);
    player.pause_video().await.unwrap();

    let calls = host.provider.handle(0).calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "pauseVideo");
}

#[tokio::test]
async fn calls_after_ready_forward_immediately() {
    let (host, factory) = fixture(&["player"]);
    let player = factory.create("player", PlayerOptions::new()).unwrap();
    host.provider.wait_constructed(1).await;
    host.provider.fire("onReady", Value::Null);

    player.set_volume(35).await.unwrap();
    player.mute().await.unwrap();
    player.destroy().await.unwrap();

    let calls = host.provider.handle(0).calls();
    assert_eq!(
        calls,
        vec![
            ("setVolume".to_string(), vec![json!(35)]),
            ("mute".to_string(), vec![]),
            ("destroy".to_string(), vec![]),
        ]
    );
}
