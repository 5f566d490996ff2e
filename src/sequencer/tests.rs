use super::{Sequencer, Watcher, WatcherState};
use crate::{
    domain::{TrackChange, TrackEntry, TrackError},
    player::{MediaBackend, PlayerStatus},
};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(f32),
    Volume(u8),
}

struct MockInner {
    calls: Vec<Call>,
    status: PlayerStatus,
    seekable: bool,
    volume: u8,
}

/// Test-side view into what the sequencer asked the backend to do
#[derive(Clone)]
struct Recorder(Arc<Mutex<MockInner>>);

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().calls.clone()
    }

    fn clear(&self) {
        self.0.lock().unwrap().calls.clear();
    }

    fn loaded(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Load(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn set_status(&self, status: PlayerStatus) {
        self.0.lock().unwrap().status = status;
    }

    fn set_seekable(&self, seekable: bool) {
        self.0.lock().unwrap().seekable = seekable;
    }
}

struct MockBackend(Recorder);

impl MockBackend {
    fn record(&self, call: Call, status: Option<PlayerStatus>) {
        let mut inner = self.0.0.lock().unwrap();
        inner.calls.push(call);
        if let Some(status) = status {
            inner.status = status;
        }
    }
}

impl MediaBackend for MockBackend {
    fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        self.record(Call::Load(path.to_path_buf()), Some(PlayerStatus::Idle));
        Ok(())
    }

    fn play(&mut self) {
        self.record(Call::Play, Some(PlayerStatus::Playing));
    }

    fn pause(&mut self) {
        self.record(Call::Pause, Some(PlayerStatus::Paused));
    }

    fn stop(&mut self) {
        self.record(Call::Stop, Some(PlayerStatus::Stopped));
    }

    fn is_playing(&self) -> bool {
        self.status() == PlayerStatus::Playing
    }

    fn is_seekable(&self) -> bool {
        self.0.0.lock().unwrap().seekable
    }

    fn set_position(&mut self, fraction: f32) -> anyhow::Result<()> {
        self.record(Call::Seek(fraction), None);
        Ok(())
    }

    fn position(&self) -> f32 {
        0.25
    }

    fn elapsed(&self) -> Duration {
        Duration::from_secs(30)
    }

    fn duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(120))
    }

    fn set_volume(&mut self, volume: u8) {
        self.0.0.lock().unwrap().volume = volume;
        self.record(Call::Volume(volume), None);
    }

    fn volume(&self) -> u8 {
        self.0.0.lock().unwrap().volume
    }

    fn status(&self) -> PlayerStatus {
        self.0.0.lock().unwrap().status
    }
}

type Changes = Arc<Mutex<Vec<TrackChange>>>;

fn sequencer() -> (Sequencer, Recorder, Changes) {
    let recorder = Recorder(Arc::new(Mutex::new(MockInner {
        calls: Vec::new(),
        status: PlayerStatus::Idle,
        seekable: false,
        volume: 80,
    })));
    let changes: Changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);

    let seq = Sequencer::new(Box::new(MockBackend(recorder.clone())))
        .with_callback(move |c| sink.lock().unwrap().push(c.clone()));

    (seq, recorder, changes)
}

/// Real files on disk named after single letter titles
fn library(titles: &[&str]) -> (TempDir, Vec<TrackEntry>) {
    let dir = tempfile::tempdir().unwrap();
    let entries = titles
        .iter()
        .map(|t| {
            let path = dir.path().join(format!("{t}.mp4"));
            fs::write(&path, b"not really audio").unwrap();
            TrackEntry::new(path, *t)
        })
        .collect();
    (dir, entries)
}

fn titles(changes: &Changes) -> Vec<String> {
    changes
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.title.clone())
        .collect()
}

#[test]
fn load_selects_first_entry_and_notifies_once() {
    let (seq, recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C"]);
    let first = entries[0].file_path.clone();

    seq.load(entries);

    assert_eq!(seq.current_index(), Some(0));
    assert_eq!(titles(&changes), vec!["A"]);
    assert_eq!(changes.lock().unwrap()[0].index, 0);
    assert_eq!(
        recorder.calls(),
        vec![Call::Stop, Call::Load(first), Call::Play]
    );
    assert!(!seq.is_paused());
}

#[test]
fn sequential_next_walks_and_wraps() {
    let (seq, _recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C"]);

    seq.load(entries);
    seq.next();
    assert_eq!(seq.current_index(), Some(1));
    seq.next();
    assert_eq!(seq.current_index(), Some(2));
    seq.next();
    assert_eq!(seq.current_index(), Some(0));

    assert_eq!(titles(&changes), vec!["A", "B", "C", "A"]);
}

#[test]
fn next_len_times_closes_the_cycle() {
    let (seq, _recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C", "D", "E"]);

    seq.load(entries);
    for _ in 0..5 {
        seq.next();
    }

    assert_eq!(seq.current_index(), Some(0));
    let indices: Vec<usize> = changes.lock().unwrap().iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 0]);
}

#[test]
fn prev_wraps_from_first_to_last() {
    let (seq, _recorder, _changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C", "D"]);

    seq.load(entries);
    seq.prev();
    assert_eq!(seq.current_index(), Some(3));
    seq.prev();
    assert_eq!(seq.current_index(), Some(2));
}

#[test]
fn prev_ignores_shuffle() {
    let (seq, _recorder, _changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C", "D"]);

    seq.load_from(entries, 2);
    seq.toggle_shuffle();
    seq.prev();
    assert_eq!(seq.current_index(), Some(1));
}

#[test]
fn empty_load_touches_nothing() {
    let (seq, recorder, changes) = sequencer();

    seq.load(Vec::new());

    assert_eq!(seq.current_index(), None);
    assert!(recorder.calls().is_empty());
    assert!(changes.lock().unwrap().is_empty());

    seq.next();
    seq.prev();
    assert!(!seq.play_at(0));
    assert!(recorder.calls().is_empty());
}

#[test]
fn missing_file_is_skipped_without_playing_it() {
    let (seq, recorder, changes) = sequencer();
    let (dir, mut entries) = library(&["B", "C"]);
    let missing = dir.path().join("gone.mp4");
    entries.insert(0, TrackEntry::new(&missing, "A"));

    seq.load(entries);

    assert_eq!(seq.current_index(), Some(1));
    assert_eq!(titles(&changes), vec!["B"]);
    assert!(!recorder.loaded().contains(&missing));
    assert_eq!(
        recorder.calls().iter().filter(|c| **c == Call::Play).count(),
        1
    );
}

#[test]
fn all_missing_gives_up_after_one_pass() {
    let (seq, recorder, changes) = sequencer();
    let dir = tempfile::tempdir().unwrap();
    let entries = ["A", "B", "C"]
        .iter()
        .map(|t| TrackEntry::new(dir.path().join(t), *t))
        .collect();

    seq.load(entries);

    assert!(changes.lock().unwrap().is_empty());
    assert!(recorder.loaded().is_empty());
    assert!(!recorder.calls().contains(&Call::Play));
    assert_eq!(seq.current_index(), Some(2));
}

#[test]
fn shuffle_skips_missing_files_until_a_playable_one() {
    for _ in 0..60 {
        let (seq, recorder, changes) = sequencer();
        let (dir, mut entries) = library(&["A"]);
        for t in ["B", "C"] {
            entries.insert(0, TrackEntry::new(dir.path().join(format!("{t}-gone.mp4")), t));
        }
        seq.toggle_shuffle();

        seq.load(entries);
        assert_eq!(seq.current_index(), Some(2));

        seq.next();
        assert_eq!(seq.current_index(), Some(2));
        assert_eq!(titles(&changes), vec!["A", "A"]);
        assert_eq!(
            recorder.calls().iter().filter(|c| **c == Call::Stop).count(),
            1
        );
    }
}

#[test]
fn shuffle_with_gaps_always_reaches_a_playable_track() {
    let (seq, _recorder, changes) = sequencer();
    let (dir, mut entries) = library(&["A", "B"]);
    for t in ["C", "D", "E"] {
        entries.push(TrackEntry::new(dir.path().join(format!("{t}-gone.mp4")), t));
    }
    seq.toggle_shuffle();
    seq.load(entries);

    for step in 1..=50 {
        seq.next();
        assert_eq!(changes.lock().unwrap().len(), step + 1);
        assert!(seq.current_entry().unwrap().path().exists());
    }
}

#[test]
fn shuffle_visits_everything_before_repeating() {
    let (seq, _recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C", "D", "E", "F"]);

    seq.toggle_shuffle();
    seq.load(entries);
    for _ in 0..5 {
        seq.next();
    }

    let visited: HashSet<usize> = changes.lock().unwrap().iter().map(|c| c.index).collect();
    assert_eq!(visited, (0..6).collect());
    assert_eq!(seq.played_indices().len(), 6);

    // Exhausted: the next pick starts a fresh round
    seq.next();
    assert_eq!(seq.played_indices().len(), 1);
}

#[test]
fn toggle_shuffle_then_load_starts_at_zero() {
    let (seq, _recorder, _changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C"]);

    seq.load(entries.clone());
    seq.next();
    seq.next();
    assert_eq!(seq.played_indices().len(), 3);

    assert!(seq.toggle_shuffle());
    assert!(seq.played_indices().is_empty());
    assert_eq!(seq.current_index(), Some(2));

    seq.load(entries);
    assert_eq!(seq.current_index(), Some(0));
    assert_eq!(seq.played_indices(), HashSet::from([0]));
    assert!(seq.is_shuffle_enabled());
}

#[test]
fn play_at_out_of_range_is_a_no_op() {
    let (seq, recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A", "B"]);

    seq.load(entries);
    recorder.clear();

    assert!(!seq.play_at(2));
    assert_eq!(seq.current_index(), Some(0));
    assert!(recorder.calls().is_empty());
    assert_eq!(changes.lock().unwrap().len(), 1);

    assert!(seq.play_at(1));
    assert_eq!(titles(&changes), vec!["A", "B"]);
}

#[test]
fn toggle_pause_follows_the_transport() {
    let (seq, recorder, _changes) = sequencer();
    let (_dir, entries) = library(&["A"]);

    seq.load(entries);
    recorder.clear();

    assert!(seq.toggle_pause());
    assert_eq!(recorder.calls(), vec![Call::Pause]);
    assert!(!seq.toggle_pause());
    assert_eq!(recorder.calls(), vec![Call::Pause, Call::Play]);

    // Paused behind our back: the next toggle resumes
    recorder.set_status(PlayerStatus::Paused);
    recorder.clear();
    assert!(!seq.toggle_pause());
    assert_eq!(recorder.calls(), vec![Call::Play]);
}

#[test]
fn toggle_pause_without_a_track_does_nothing() {
    let (seq, recorder, _changes) = sequencer();

    assert!(!seq.toggle_pause());
    assert!(recorder.calls().is_empty());
}

#[test]
fn volume_is_clamped_to_percent() {
    let (seq, recorder, _changes) = sequencer();

    seq.set_volume(150.0);
    seq.set_volume(-3.0);
    seq.set_volume(f64::NAN);
    seq.set_volume(42.9);

    assert_eq!(
        recorder.calls(),
        vec![
            Call::Volume(100),
            Call::Volume(0),
            Call::Volume(0),
            Call::Volume(42)
        ]
    );
    assert_eq!(seq.volume(), 42);
}

#[test]
fn seeking_requires_seekable_media() {
    let (seq, recorder, _changes) = sequencer();

    seq.set_position(0.5);
    assert!(recorder.calls().is_empty());

    recorder.set_seekable(true);
    seq.set_position(1.7);
    seq.set_position(-1.0);
    assert_eq!(recorder.calls(), vec![Call::Seek(1.0), Call::Seek(0.0)]);
}

#[test]
fn malformed_rows_leave_state_alone() {
    let (seq, recorder, _changes) = sequencer();
    let (_dir, entries) = library(&["A", "B"]);

    seq.load(entries);
    seq.next();
    recorder.clear();

    let rows = vec![
        vec![Some("/x.mp4".to_string()), Some("X".to_string())],
        vec![Some("/y.mp4".to_string())],
    ];
    assert_eq!(
        seq.load_raw(rows),
        Err(TrackError::MalformedEntry { arity: 1 })
    );

    assert_eq!(seq.current_index(), Some(1));
    assert_eq!(seq.len(), 2);
    assert!(recorder.calls().is_empty());
}

#[test]
fn raw_rows_are_normalized_on_load() {
    let (seq, _recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A"]);
    let path = entries[0].file_path.to_string_lossy().into_owned();

    seq.load_raw(vec![vec![
        Some(path),
        Some("A".to_string()),
        Some("/covers/a.jpg".to_string()),
        Some("Someone".to_string()),
    ]])
    .unwrap();

    let change = changes.lock().unwrap()[0].clone();
    assert_eq!(change.artist.as_deref(), Some("Someone"));
    assert_eq!(change.cover_path, Some(PathBuf::from("/covers/a.jpg")));
}

#[test]
fn advance_if_ended_respects_pause() {
    let (seq, recorder, _changes) = sequencer();
    let (_dir, entries) = library(&["A", "B"]);

    seq.load(entries);
    assert!(!seq.advance_if_ended());

    recorder.set_status(PlayerStatus::Ended);
    assert!(seq.advance_if_ended());
    assert_eq!(seq.current_index(), Some(1));

    seq.toggle_pause();
    recorder.set_status(PlayerStatus::Ended);
    assert!(!seq.advance_if_ended());
    assert_eq!(seq.current_index(), Some(1));
}

#[test]
fn shutdown_stops_output_and_running() {
    let (seq, recorder, _changes) = sequencer();

    assert!(seq.is_running());
    seq.shutdown();

    assert!(!seq.is_running());
    assert_eq!(recorder.calls(), vec![Call::Stop]);
}

#[test]
fn progress_reports_backend_position() {
    let (seq, _recorder, _changes) = sequencer();

    let progress = seq.progress();
    assert_eq!(progress.elapsed, Duration::from_secs(30));
    assert_eq!(progress.duration, Some(Duration::from_secs(120)));
    assert_eq!(progress.fraction, 0.25);
}

#[test]
fn watcher_advances_on_end_and_exits_after_shutdown() {
    let (seq, recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C"]);
    seq.load(entries);

    let watcher = Watcher::spawn(seq.clone(), Duration::from_millis(10));
    assert_eq!(watcher.state(), WatcherState::Running);

    recorder.set_status(PlayerStatus::Ended);
    let deadline = Instant::now() + Duration::from_secs(2);
    while seq.current_index() != Some(1) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(seq.current_index(), Some(1));
    assert_eq!(titles(&changes), vec!["A", "B"]);

    seq.shutdown();
    let deadline = Instant::now() + Duration::from_secs(2);
    while watcher.state() == WatcherState::Running && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(watcher.state(), WatcherState::Stopped);
    watcher.join();
}

#[test]
fn concurrent_nexts_do_not_lose_steps() {
    let (seq, _recorder, changes) = sequencer();
    let (_dir, entries) = library(&["A", "B", "C", "D", "E", "F", "G"]);
    seq.load(entries);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let seq = seq.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    seq.next();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    assert_eq!(seq.current_index(), Some(100 % 7));
    assert_eq!(changes.lock().unwrap().len(), 101);
}

#[test]
fn late_notifications_can_be_recognised_as_stale() {
    let recorder = Recorder(Arc::new(Mutex::new(MockInner {
        calls: Vec::new(),
        status: PlayerStatus::Idle,
        seekable: false,
        volume: 80,
    })));
    let changes: Changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);

    // The change to index 1 is slow to deliver
    let seq = Sequencer::new(Box::new(MockBackend(recorder))).with_callback(move |c| {
        if c.index == 1 {
            thread::sleep(Duration::from_millis(50));
        }
        sink.lock().unwrap().push(c.clone());
    });

    let (_dir, entries) = library(&["A", "B", "C"]);
    seq.load(entries);

    let slow = {
        let seq = seq.clone();
        thread::spawn(move || seq.next())
    };
    thread::sleep(Duration::from_millis(10));
    seq.next();
    slow.join().unwrap();

    assert_eq!(seq.current_index(), Some(2));
    let current: Vec<usize> = changes
        .lock()
        .unwrap()
        .iter()
        .filter(|c| seq.is_current(c))
        .map(|c| c.index)
        .collect();
    assert_eq!(current, vec![2]);
}
