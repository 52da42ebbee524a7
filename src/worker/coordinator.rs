//! Coordinator: fans out workers and owns the stop decision.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{select, tick, unbounded, Receiver};

use crate::matcher::SearchPattern;
use crate::output::format_number;

use super::search::{SearchWorker, WorkerState};
use super::{ProgressReport, StopSignal, VanityResult};

/// Default attempts between progress reports.
pub const DEFAULT_STEP: u64 = 50_000;
/// Default global attempt budget.
pub const DEFAULT_MAX_TRIES: u64 = 5_000_000_000_000_000;
/// Default interval between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(10_000);

/// Parameters of a search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub pattern: SearchPattern,
    /// Number of worker threads
    pub workers: usize,
    /// Attempts between progress reports / stop checks
    pub step: u64,
    /// Global attempt budget (also each worker's local budget)
    pub max_tries: u64,
    /// How often the aggregate counter is logged
    pub progress_interval: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: SearchPattern::default(),
            workers: num_cpus::get(),
            step: DEFAULT_STEP,
            max_tries: DEFAULT_MAX_TRIES,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A worker found a matching keypair.
    Found(VanityResult),
    /// The budget ran out without a match.
    Exhausted { total_attempts: u64 },
    /// The search was stopped from outside.
    Interrupted { total_attempts: u64 },
}

/// Aggregate attempt counter and termination decision.
///
/// Fed one report at a time by the coordinator, which is its only owner.
/// Yields an outcome at most once; later reports are ignored.
#[derive(Debug)]
pub struct Tally {
    total_attempts: u64,
    max_tries: u64,
    num_workers: usize,
    exhausted_workers: usize,
    finished: bool,
}

impl Tally {
    pub fn new(num_workers: usize, max_tries: u64) -> Self {
        Self {
            total_attempts: 0,
            max_tries,
            num_workers,
            exhausted_workers: 0,
            finished: false,
        }
    }

    /// Applies a report. Returns the outcome if this report ends the search.
    pub fn record(&mut self, report: ProgressReport) -> Option<SearchOutcome> {
        if self.finished {
            return None;
        }

        let outcome = match report {
            ProgressReport::Found(result) => Some(SearchOutcome::Found(result)),
            ProgressReport::Attempts { count, .. } => {
                self.total_attempts = self.total_attempts.saturating_add(count);
                (self.total_attempts >= self.max_tries).then_some(SearchOutcome::Exhausted {
                    total_attempts: self.total_attempts,
                })
            }
            ProgressReport::Exhausted { .. } => {
                self.exhausted_workers += 1;
                (self.exhausted_workers >= self.num_workers).then_some(SearchOutcome::Exhausted {
                    total_attempts: self.total_attempts,
                })
            }
        };

        self.finished = outcome.is_some();
        outcome
    }

    /// Marks the tally finished and returns the interrupted outcome.
    pub fn interrupt(&mut self) -> SearchOutcome {
        self.finished = true;
        SearchOutcome::Interrupted {
            total_attempts: self.total_attempts,
        }
    }

    pub fn total_attempts(&self) -> u64 {
        self.total_attempts
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

enum Event {
    Report(ProgressReport),
    Disconnected,
    Tick,
}

/// Runs one search worker per thread and aggregates their reports.
pub struct Coordinator {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<WorkerState>>>,
    /// Channel receiver for worker reports
    report_rx: Receiver<ProgressReport>,
    /// Shared stop signal
    stop: StopSignal,
    tally: Tally,
    outcome: Option<SearchOutcome>,
    progress_interval: Duration,
    /// Start time
    start_time: Instant,
}

impl Coordinator {
    /// Spawns the workers and returns the coordinator that owns them.
    pub fn start(config: SearchConfig) -> Self {
        let num_workers = config.workers.max(1);
        // Unbounded so a finished coordinator never blocks a worker mid-send.
        let (report_tx, report_rx) = unbounded();
        let stop = StopSignal::new();
        // Workers search for the lowercase form of the pattern.
        let pattern = Arc::new(config.pattern.lowercased());

        let handles = (0..num_workers)
            .map(|id| {
                let worker = SearchWorker::new(
                    id,
                    pattern.clone(),
                    config.step,
                    config.max_tries,
                    report_tx.clone(),
                    stop.clone(),
                );

                thread::Builder::new()
                    .name(format!("vanity-worker-{}", id))
                    .spawn(move || worker.run())
                    .expect("Failed to spawn worker thread")
            })
            .collect();

        // Drop the extra sender so the channel closes when all workers finish
        drop(report_tx);

        log::debug!("Spawned {} search workers", num_workers);

        Self {
            num_workers,
            handles: Some(handles),
            report_rx,
            stop,
            tally: Tally::new(num_workers, config.max_tries),
            outcome: None,
            progress_interval: config.progress_interval,
            start_time: Instant::now(),
        }
    }

    /// Processes reports until the search ends, then stops every worker.
    ///
    /// Calling it again returns the same outcome.
    pub fn run(&mut self) -> SearchOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let ticker = tick(self.progress_interval);

        let outcome = loop {
            if self.stop.is_triggered() {
                break self.drain_after_stop();
            }

            let event = select! {
                recv(self.report_rx) -> msg => msg.map_or(Event::Disconnected, Event::Report),
                recv(ticker) -> _ => Event::Tick,
            };

            match event {
                Event::Report(report) => {
                    if let Some(outcome) = self.tally.record(report) {
                        break outcome;
                    }
                }
                Event::Tick => self.log_progress(),
                Event::Disconnected => {
                    if self.stop.is_triggered() {
                        break self.drain_after_stop();
                    }
                    log::warn!("All workers exited before the search concluded");
                    self.tally.finished = true;
                    break SearchOutcome::Exhausted {
                        total_attempts: self.tally.total_attempts(),
                    };
                }
            }
        };

        if self.stop() {
            log::info!("Search finished, stopping {} workers", self.num_workers);
        }
        self.outcome = Some(outcome.clone());
        outcome
    }

    /// Picks up a match that was already queued when the stop arrived;
    /// otherwise the search counts as interrupted.
    fn drain_after_stop(&mut self) -> SearchOutcome {
        while let Ok(report) = self.report_rx.try_recv() {
            if let ProgressReport::Found(result) = report {
                self.tally.finished = true;
                return SearchOutcome::Found(result);
            }
            self.tally.record(report);
        }
        self.tally.interrupt()
    }

    fn log_progress(&self) {
        log::info!(
            "Total checked addresses: {} ({}/s)",
            format_number(self.total_attempts()),
            format_number(self.attempts_per_second() as u64)
        );
    }

    /// Signals all workers to stop. Returns `true` only for the first call.
    pub fn stop(&self) -> bool {
        self.stop.trigger()
    }

    /// Returns a handle to the stop signal for external use (e.g., signal handlers).
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Stops and waits for all workers, returning their final states.
    pub fn join(mut self) -> Vec<WorkerState> {
        self.join_workers()
    }

    fn join_workers(&mut self) -> Vec<WorkerState> {
        self.stop();
        self.handles
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|handle| handle.join().unwrap_or(WorkerState::Cancelled))
            .collect()
    }

    /// Returns the aggregate attempts reported so far.
    pub fn total_attempts(&self) -> u64 {
        self.tally.total_attempts()
    }

    /// Returns the elapsed time since the workers were started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current search rate (attempts per second).
    pub fn attempts_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_attempts() as f64 / elapsed
        } else {
            0.0
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.join_workers();
    }
}
