//! Integration tests for signal-driven reload, exercised through the
//! [`ReloadSignal`] seam so no real signals are raised.

use std::future::Future;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use hup_config::error::DecodeError;
use hup_config::prelude::*;
use hup_config::reload::ReloadSignal;
use hup_config::schema::field;
use hup_config::sources::{FileDecoder, YamlFile};
use tempfile::TempDir;
use tokio::sync::mpsc;

struct ChannelSignal(mpsc::Receiver<()>);

impl ReloadSignal for ChannelSignal {
    fn recv(&mut self) -> impl Future<Output = Option<()>> + Send {
        self.0.recv()
    }
}

#[derive(Debug, Default)]
struct RelaySettings {
    port: u16,
}

impl Settings for RelaySettings {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<RelaySettings>] = &[
            FieldSpec::new("port", |s| s.port.is_unset())
                .from_file("port", |s, v| field::assign(&mut s.port, v)),
        ];
        FIELDS
    }
}

/// Counts file-decode invocations, then delegates to the shipped decoder.
#[derive(Clone)]
struct CountingYaml(Arc<AtomicUsize>);

impl FileDecoder<RelaySettings> for CountingYaml {
    fn decode(
        &self,
        bytes: &[u8],
        target: &mut RelaySettings,
    ) -> std::result::Result<(), DecodeError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        YamlFile::new().decode(bytes, target)
    }
}

async fn wait_until(deadline: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = tokio::time::Instant::now();
    while start.elapsed() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

#[tokio::test]
async fn arming_twice_is_a_noop_and_one_signal_means_one_reload() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("relay.yaml");
    fs::write(&path, "port: 1\n").expect("write fixture");

    let handle = ConfigHandle::new(RelaySettings::default(), &path).expect("valid path");
    let loads = Arc::new(AtomicUsize::new(0));

    let (tx, rx) = mpsc::channel(4);
    let first = ReloadWatcher::new(
        Loader::new().with_file_decoder(CountingYaml(Arc::clone(&loads))),
    )
    .arm_with(&handle, ChannelSignal(rx));
    assert!(first.is_some());
    assert!(handle.is_reload_armed());

    // Second arm: no second task, no matter which loader it carries.
    let (tx2, rx2) = mpsc::channel(4);
    let second = ReloadWatcher::new(
        Loader::new().with_file_decoder(CountingYaml(Arc::clone(&loads))),
    )
    .arm_with(&handle, ChannelSignal(rx2));
    assert!(second.is_none());

    tx.send(()).await.expect("signal delivered");
    // The second watcher never spawned, so its signal stream has no
    // receiver left to deliver to.
    assert!(tx2.send(()).await.is_err());

    assert!(wait_until(Duration::from_secs(2), || loads.load(Ordering::SeqCst) == 1).await);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(handle.lock().port, 1);
}

#[tokio::test]
async fn reload_applies_new_file_contents() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("relay.yaml");
    fs::write(&path, "port: 1\n").expect("write fixture");

    let handle = ConfigHandle::new(RelaySettings::default(), &path).expect("valid path");
    let loader = Loader::new();
    loader.load(&handle).expect("initial load");
    assert_eq!(handle.lock().port, 1);

    let (tx, rx) = mpsc::channel(4);
    let _task = ReloadWatcher::new(loader)
        .arm_with(&handle, ChannelSignal(rx))
        .expect("first arm");

    fs::write(&path, "port: 2\n").expect("rewrite fixture");
    tx.send(()).await.expect("signal delivered");

    assert!(wait_until(Duration::from_secs(2), || handle.lock().port == 2).await);
}

#[tokio::test]
async fn keep_previous_policy_survives_a_bad_reload() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("relay.yaml");
    fs::write(&path, "port: 1\n").expect("write fixture");

    let handle = ConfigHandle::new(RelaySettings::default(), &path).expect("valid path");
    let loads = Arc::new(AtomicUsize::new(0));
    let loader = Loader::new().with_file_decoder(CountingYaml(Arc::clone(&loads)));
    loader.load(&handle).expect("initial load");

    let (tx, rx) = mpsc::channel(4);
    let task = ReloadWatcher::new(loader)
        .on_failure(ReloadFailurePolicy::KeepPrevious)
        .arm_with(&handle, ChannelSignal(rx))
        .expect("first arm");

    // A reload that fails to decode keeps the previous settings and keeps
    // the watcher alive.
    fs::write(&path, "port: [oops]\n").expect("rewrite fixture");
    tx.send(()).await.expect("signal delivered");
    assert!(wait_until(Duration::from_secs(2), || loads.load(Ordering::SeqCst) == 2).await);
    assert_eq!(handle.lock().port, 1);
    assert!(!task.is_finished());

    // The next signal reloads normally.
    fs::write(&path, "port: 3\n").expect("rewrite fixture");
    tx.send(()).await.expect("signal delivered");
    assert!(wait_until(Duration::from_secs(2), || handle.lock().port == 3).await);
}

#[tokio::test]
async fn closing_the_signal_stream_ends_the_watcher() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("relay.yaml");
    fs::write(&path, "port: 1\n").expect("write fixture");

    let handle = ConfigHandle::new(RelaySettings::default(), &path).expect("valid path");
    let (tx, rx) = mpsc::channel(4);
    let task = ReloadWatcher::new(Loader::new())
        .arm_with(&handle, ChannelSignal(rx))
        .expect("first arm");

    drop(tx);
    assert!(wait_until(Duration::from_secs(2), || task.is_finished()).await);
}

#[tokio::test]
async fn stop_cancels_the_watcher_task() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("relay.yaml");
    fs::write(&path, "port: 1\n").expect("write fixture");

    let handle = ConfigHandle::new(RelaySettings::default(), &path).expect("valid path");
    let (_tx, rx) = mpsc::channel(4);
    let task = ReloadWatcher::new(Loader::new())
        .arm_with(&handle, ChannelSignal(rx))
        .expect("first arm");

    task.stop();
    assert!(wait_until(Duration::from_secs(2), || task.is_finished()).await);
}

#[derive(Debug, Default)]
struct PairSettings {
    lower: u64,
    upper: u64,
}

impl Settings for PairSettings {
    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<PairSettings>] = &[
            FieldSpec::new("lower", |s| s.lower.is_unset()),
            FieldSpec::new("upper", |s| s.upper.is_unset()),
        ];
        FIELDS
    }
}

/// Writes both fields from the same number with a deliberate pause between
/// them, widening the window in which a reader could observe a half-merged
/// pair if the guard were broken.
struct SlowPair;

impl FileDecoder<PairSettings> for SlowPair {
    fn decode(
        &self,
        bytes: &[u8],
        target: &mut PairSettings,
    ) -> std::result::Result<(), DecodeError> {
        let n: u64 = String::from_utf8_lossy(bytes)
            .trim()
            .parse()
            .map_err(|err| DecodeError::Document(format!("{err}")))?;
        target.lower = n;
        std::thread::sleep(Duration::from_millis(20));
        target.upper = n;
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_observe_a_half_merged_aggregate() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("pair.cfg");
    fs::write(&path, "0").expect("write fixture");

    let handle = ConfigHandle::new(PairSettings::default(), &path).expect("valid path");
    let (tx, rx) = mpsc::channel(8);
    let _task = ReloadWatcher::new(Loader::new().with_file_decoder(SlowPair))
        .arm_with(&handle, ChannelSignal(rx))
        .expect("first arm");

    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let handle = handle.clone();
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut observations = 0u64;
            while !stop.load(Ordering::Relaxed) {
                let settings = handle.lock();
                assert_eq!(settings.lower, settings.upper, "half-merged pair observed");
                drop(settings);
                observations += 1;
            }
            observations
        })
    };

    for n in 1..=5u64 {
        fs::write(&path, n.to_string()).expect("rewrite fixture");
        tx.send(()).await.expect("signal delivered");
        assert!(wait_until(Duration::from_secs(2), || handle.lock().upper == n).await);
    }

    stop.store(true, Ordering::Relaxed);
    let observations = reader.join().expect("reader thread");
    assert!(observations > 0);
}
