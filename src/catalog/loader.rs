//! Batched FIGlet font loading.
//!
//! Loading is planned once the worker has listed the font directory: featured
//! fonts form the first batch (sent even when empty so a first progress event
//! always arrives), the remaining names follow in chunks of the configured
//! batch size. Exactly one batch is in flight at a time. After each batch the
//! loader publishes a fresh snapshot of the ready set; snapshots are never
//! mutated once handed out.

use crate::catalog::is_featured_figlet;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;

/// Fonts per non-featured batch when the configuration does not say otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoaderState {
    #[default]
    Idle,
    Listing,
    Loading,
    Finished,
    Cancelled,
}

/// One unit of work handed to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub index: usize,
    pub names: Vec<String>,
}

/// Published after every completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    /// 1-based number of the batch that just completed.
    pub batch: usize,
    pub batches: usize,
    pub loaded: usize,
    pub failed: usize,
    pub total: usize,
    /// Every font parsed so far, in load order.
    pub ready: Arc<[String]>,
    pub finished: bool,
}

/// Drives loading of the FIGlet font directory in batches.
#[derive(Debug, Default)]
pub struct FontLoader {
    state: LoaderState,
    pending: VecDeque<Batch>,
    in_flight: Option<usize>,
    batches: usize,
    total: usize,
    ready: Vec<String>,
    failed: Vec<String>,
    started_at: Option<DateTime<Utc>>,
}

impl FontLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves from idle to listing. Returns `false` if loading already started
    /// or was cancelled, so the directory is listed at most once.
    pub fn start_listing(&mut self) -> bool {
        if self.state != LoaderState::Idle {
            return false;
        }
        self.state = LoaderState::Listing;
        self.started_at = Some(Utc::now());
        true
    }

    /// Splits the listed names into the featured batch and fixed-size chunks.
    ///
    /// A `batch_size` of zero is treated as one.
    pub fn plan(&mut self, names: Vec<String>, batch_size: usize) {
        if self.state != LoaderState::Listing {
            tracing::debug!(state = ?self.state, "ignoring font listing outside listing state");
            return;
        }

        let batch_size = batch_size.max(1);
        let (featured, rest): (Vec<String>, Vec<String>) =
            names.into_iter().partition(|name| is_featured_figlet(name));

        self.total = featured.len() + rest.len();
        self.pending.push_back(Batch { index: 0, names: featured });
        for chunk in rest.chunks(batch_size) {
            let index = self.pending.len();
            self.pending.push_back(Batch {
                index,
                names: chunk.to_vec(),
            });
        }
        self.batches = self.pending.len();
        self.state = LoaderState::Loading;

        tracing::info!(total = self.total, batches = self.batches, batch_size, "planned FIGlet font loading");
    }

    /// Takes the next batch to send, if none is in flight.
    pub fn next_batch(&mut self) -> Option<Batch> {
        if self.state != LoaderState::Loading || self.in_flight.is_some() {
            return None;
        }
        let batch = self.pending.pop_front()?;
        self.in_flight = Some(batch.index);
        Some(batch)
    }

    /// Whether a reply for batch `index` would be accepted right now.
    #[must_use]
    pub fn expects(&self, index: usize) -> bool {
        self.state == LoaderState::Loading && self.in_flight == Some(index)
    }

    /// Records the outcome of a batch and publishes a new ready snapshot.
    ///
    /// Returns `None` for replies that arrive after cancellation or that do
    /// not belong to the batch in flight.
    pub fn complete_batch(&mut self, index: usize, loaded: Vec<String>, failed: Vec<String>) -> Option<LoadProgress> {
        if self.state != LoaderState::Loading || self.in_flight != Some(index) {
            tracing::debug!(index, state = ?self.state, in_flight = ?self.in_flight, "dropping stale batch reply");
            return None;
        }
        self.in_flight = None;
        self.ready.extend(loaded);
        self.failed.extend(failed);

        let finished = self.pending.is_empty();
        if finished {
            self.state = LoaderState::Finished;
            let elapsed_ms = self
                .started_at
                .map(|start| (Utc::now() - start).num_milliseconds())
                .unwrap_or_default();
            tracing::info!(
                loaded = self.ready.len(),
                failed = self.failed.len(),
                elapsed_ms,
                "FIGlet font loading finished"
            );
        }

        Some(LoadProgress {
            batch: index + 1,
            batches: self.batches,
            loaded: self.ready.len(),
            failed: self.failed.len(),
            total: self.total,
            ready: self.ready.as_slice().into(),
            finished,
        })
    }

    /// Stops loading; no further batches are handed out and late replies are
    /// ignored.
    pub fn cancel(&mut self) {
        if matches!(self.state, LoaderState::Listing | LoaderState::Loading) {
            tracing::info!(loaded = self.ready.len(), "FIGlet font loading cancelled");
        }
        self.state = LoaderState::Cancelled;
        self.pending.clear();
        self.in_flight = None;
    }

    /// Whether the loader is still listing or loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoaderState::Listing | LoaderState::Loading)
    }

    /// Whether every planned batch has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == LoaderState::Finished
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state == LoaderState::Cancelled
    }

    /// Names of fonts that failed to parse.
    #[must_use]
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// `(loaded, total)` for the status line.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        (self.ready.len(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn planned(list: Vec<String>, batch_size: usize) -> FontLoader {
        let mut loader = FontLoader::new();
        assert!(loader.start_listing());
        loader.plan(list, batch_size);
        loader
    }

    /// Drives the loader to completion, loading every name successfully.
    fn run(loader: &mut FontLoader) -> Vec<LoadProgress> {
        let mut events = Vec::new();
        while let Some(batch) = loader.next_batch() {
            events.push(loader.complete_batch(batch.index, batch.names, Vec::new()).unwrap());
        }
        events
    }

    #[test]
    fn progress_events_match_batch_formula() {
        // N = 47 names, F = 3 featured, batch 10 → ceil(44 / 10) + 1 = 6
        let mut list: Vec<String> = (0..44).map(|i| format!("font{i:02}")).collect();
        list.extend(names(&["slant", "Big", "ANSI Shadow"]));

        let mut loader = planned(list, 10);
        let events = run(&mut loader);

        assert_eq!(events.len(), 6);
        assert!(events.last().unwrap().finished);
        assert_eq!(events.last().unwrap().loaded, 47);
        assert!(!loader.is_loading());
    }

    #[test]
    fn default_batches_with_failures_leave_exactly_the_survivors() {
        // N = 120, F = 4, batch 20 → ceil(116 / 20) + 1 = 7
        let mut list: Vec<String> = (0..116).map(|i| format!("font{i:03}")).collect();
        list.extend(names(&["standard", "doom", "slant", "3-D"]));
        let is_broken = |name: &str| name == "3-D" || name.strip_prefix("font").is_some_and(|n| n.ends_with('7'));
        let expected_failures = list.iter().filter(|name| is_broken(name.as_str())).count();
        assert_eq!(expected_failures, 13);

        let mut loader = planned(list.clone(), DEFAULT_BATCH_SIZE);
        let mut events = Vec::new();
        while let Some(batch) = loader.next_batch() {
            let (failed, loaded): (Vec<String>, Vec<String>) =
                batch.names.into_iter().partition(|name| is_broken(name.as_str()));
            events.push(loader.complete_batch(batch.index, loaded, failed).unwrap());
        }

        assert_eq!(events.len(), 7);
        let last = events.last().unwrap();
        assert!(last.finished);
        assert_eq!(last.failed, expected_failures);
        assert_eq!(last.ready.len(), 120 - expected_failures);

        let mut ready: Vec<&String> = last.ready.iter().collect();
        ready.sort();
        let mut survivors: Vec<&String> = list.iter().filter(|name| !is_broken(name.as_str())).collect();
        survivors.sort();
        assert_eq!(ready, survivors);
    }

    #[test]
    fn featured_batch_comes_first_and_is_sent_when_empty() {
        let mut loader = planned(names(&["alpha", "doom", "beta"]), 20);
        let first = loader.next_batch().unwrap();
        assert_eq!(first.names, ["doom"]);

        let mut loader = planned(names(&["alpha", "beta"]), 20);
        let first = loader.next_batch().unwrap();
        assert!(first.names.is_empty());
        let progress = loader.complete_batch(first.index, Vec::new(), Vec::new()).unwrap();
        assert!(!progress.finished);
        assert_eq!(progress.batches, 2);
    }

    #[test]
    fn empty_directory_finishes_after_one_event() {
        let mut loader = planned(Vec::new(), 20);
        let events = run(&mut loader);
        assert_eq!(events.len(), 1);
        assert!(events[0].finished);
        assert_eq!(events[0].total, 0);
        assert!(loader.is_finished());
    }

    #[test]
    fn ready_set_only_grows_and_snapshots_are_frozen() {
        let list: Vec<String> = (0..5).map(|i| format!("f{i}")).collect();
        let mut loader = planned(list, 2);

        let mut previous: Option<Arc<[String]>> = None;
        while let Some(batch) = loader.next_batch() {
            let progress = loader.complete_batch(batch.index, batch.names, Vec::new()).unwrap();
            if let Some(prev) = &previous {
                assert!(progress.ready.len() >= prev.len());
                assert_eq!(&progress.ready[..prev.len()], &prev[..]);
            }
            previous = Some(progress.ready);
        }
        assert_eq!(previous.unwrap().len(), 5);
    }

    #[test]
    fn one_batch_in_flight_at_a_time() {
        let mut loader = planned(names(&["a", "b", "c"]), 1);
        let first = loader.next_batch().unwrap();
        assert_eq!(loader.next_batch(), None);
        loader.complete_batch(first.index, Vec::new(), Vec::new());
        assert!(loader.next_batch().is_some());
    }

    #[test]
    fn failures_are_counted_and_excluded() {
        let mut loader = planned(names(&["good", "bad"]), 20);
        let featured = loader.next_batch().unwrap();
        loader.complete_batch(featured.index, Vec::new(), Vec::new());

        let batch = loader.next_batch().unwrap();
        let progress = loader
            .complete_batch(batch.index, names(&["good"]), names(&["bad"]))
            .unwrap();

        assert_eq!(&progress.ready[..], ["good".to_string()]);
        assert_eq!(progress.failed, 1);
        assert_eq!(loader.failed(), ["bad".to_string()]);
        assert!(progress.finished);
    }

    #[test]
    fn cancel_stops_batches_and_ignores_late_replies() {
        let mut loader = planned(names(&["a", "b", "c"]), 1);
        let in_flight = loader.next_batch().unwrap();

        loader.cancel();
        assert_eq!(loader.complete_batch(in_flight.index, Vec::new(), Vec::new()), None);
        assert_eq!(loader.next_batch(), None);
        assert!(loader.is_cancelled());
        assert!(!loader.start_listing());
    }

    #[test]
    fn mismatched_reply_is_dropped() {
        let mut loader = planned(names(&["a", "b"]), 1);
        let batch = loader.next_batch().unwrap();
        assert_eq!(loader.complete_batch(batch.index + 5, Vec::new(), Vec::new()), None);
        assert!(loader.complete_batch(batch.index, Vec::new(), Vec::new()).is_some());
    }

    #[test]
    fn listing_happens_once() {
        let mut loader = FontLoader::new();
        assert!(loader.start_listing());
        assert!(!loader.start_listing());
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let mut loader = planned(names(&["a", "b"]), 0);
        assert_eq!(run(&mut loader).len(), 3);
    }
}
