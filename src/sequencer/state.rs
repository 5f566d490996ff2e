use crate::domain::TrackEntry;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

/// Everything the sequencer mutates. Only ever touched behind the sequencer lock.
#[derive(Default)]
pub(crate) struct PlaybackState {
    pub entries: Vec<TrackEntry>,
    pub current: Option<usize>,
    pub paused: bool,
    pub shuffle: bool,
    pub played: HashSet<usize>,
}

impl PlaybackState {
    pub fn replace(&mut self, entries: Vec<TrackEntry>) {
        self.current = match entries.is_empty() {
            true => None,
            false => Some(0),
        };
        self.entries = entries;
        self.played.clear();
        self.paused = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_entry(&self) -> Option<(usize, &TrackEntry)> {
        let idx = self.current?;
        self.entries.get(idx).map(|e| (idx, e))
    }

    pub fn mark_played(&mut self, idx: usize) {
        self.played.insert(idx);
    }

    /// Move the cursor forward according to the active policy
    pub fn advance(&mut self) {
        self.advance_past(&HashSet::new());
    }

    /// Like `advance`, but never lands on an index in `skip` while another
    /// index is still available.
    pub fn advance_past(&mut self, skip: &HashSet<usize>) {
        if self.is_empty() {
            return;
        }
        self.current = match self.shuffle {
            true => self.pick_unplayed(skip),
            false => Some(self.next_sequential(skip)),
        };
    }

    fn next_sequential(&self, skip: &HashSet<usize>) -> usize {
        let len = self.len();
        let start = self.current.map_or(0, |i| (i + 1) % len);

        (0..len)
            .map(|step| (start + step) % len)
            .find(|i| !skip.contains(i))
            .unwrap_or(start)
    }

    /// Move the cursor back by one, wrapping. Shuffle has no say here.
    pub fn retreat(&mut self) {
        if self.is_empty() {
            return;
        }
        let len = self.len();
        self.current = Some(self.current.map_or(len - 1, |i| (i + len - 1) % len));
    }

    // Sampling without replacement; the played set resets once exhausted
    fn pick_unplayed(&mut self, skip: &HashSet<usize>) -> Option<usize> {
        let len = self.len();
        let eligible = |played: &HashSet<usize>| -> Vec<usize> {
            (0..len)
                .filter(|i| !played.contains(i) && !skip.contains(i))
                .collect()
        };

        let mut candidates = eligible(&self.played);
        if candidates.is_empty() {
            self.played.clear();
            candidates = eligible(&self.played);
        }
        if candidates.is_empty() {
            candidates = (0..len).collect();
        }

        let picked = candidates.choose(&mut rand::rng()).copied();
        if let Some(idx) = picked {
            self.played.insert(idx);
        }
        picked
    }
}
