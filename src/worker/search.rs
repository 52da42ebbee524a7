//! CPU search worker.

use std::sync::Arc;

use crossbeam_channel::Sender;
use secp256k1::Secp256k1;

use crate::crypto::Keypair;
use crate::matcher::SearchPattern;

use super::{ProgressReport, StopSignal, VanityResult};

/// Lifecycle of a worker: `Running` until one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Found,
    BudgetExhausted,
    Cancelled,
}

/// A worker that generates random keypairs and tests them against the pattern.
pub struct SearchWorker {
    /// Worker ID
    id: usize,
    /// The pattern to match against
    pattern: Arc<SearchPattern>,
    /// Attempts between progress reports and stop checks
    step: u64,
    /// Attempts this worker may make before giving up
    max_tries: u64,
    /// Channel to the coordinator
    report_tx: Sender<ProgressReport>,
    /// Shared stop signal
    stop: StopSignal,
}

impl SearchWorker {
    /// Creates a new search worker. A `step` of zero is treated as one.
    pub fn new(
        id: usize,
        pattern: Arc<SearchPattern>,
        step: u64,
        max_tries: u64,
        report_tx: Sender<ProgressReport>,
        stop: StopSignal,
    ) -> Self {
        Self {
            id,
            pattern,
            step: step.max(1),
            max_tries,
            report_tx,
            stop,
        }
    }

    /// Runs the attempt loop until a terminal state is reached.
    ///
    /// Every `step` attempts the worker reports progress and checks the stop
    /// signal; that is the only point where it can be cancelled. A closed
    /// channel counts as cancellation.
    pub fn run(&self) -> WorkerState {
        let secp = Secp256k1::signing_only();
        let mut rng = rand::thread_rng();
        let mut attempts: u64 = 0;

        log::debug!("Worker {} started", self.id);

        while attempts < self.max_tries {
            attempts += 1;
            let keypair = Keypair::generate_with(&secp, &mut rng);

            if self.pattern.matches(keypair.address()) {
                let result = VanityResult {
                    private_key: keypair.private_key_hex(),
                    address: keypair.address().to_checksum(),
                    attempts,
                    worker_id: self.id,
                };
                log::debug!("Worker {} matched after {} attempts", self.id, attempts);

                return if self.report(ProgressReport::Found(result)) {
                    WorkerState::Found
                } else {
                    WorkerState::Cancelled
                };
            }

            if attempts % self.step == 0 {
                let report = ProgressReport::Attempts {
                    worker_id: self.id,
                    count: self.step,
                };
                if !self.report(report) || self.stop.is_triggered() {
                    log::debug!("Worker {} cancelled after {} attempts", self.id, attempts);
                    return WorkerState::Cancelled;
                }
            }
        }

        log::debug!("Worker {} exhausted its budget of {}", self.id, self.max_tries);
        self.report(ProgressReport::Exhausted { worker_id: self.id });
        WorkerState::BudgetExhausted
    }

    /// Sends a report; returns `false` if the coordinator is gone.
    fn report(&self, report: ProgressReport) -> bool {
        self.report_tx.send(report).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn unreachable_pattern() -> Arc<SearchPattern> {
        // Full-length pattern: 1 in 16^40 per attempt.
        Arc::new(SearchPattern::new("f".repeat(40), "", false))
    }

    #[test]
    fn test_budget_exhaustion_reports_once() {
        let (tx, rx) = unbounded();
        let worker = SearchWorker::new(3, unreachable_pattern(), 100, 100, tx, StopSignal::new());

        assert_eq!(worker.run(), WorkerState::BudgetExhausted);
        drop(worker);

        let reports: Vec<_> = rx.iter().collect();
        assert_eq!(
            reports,
            vec![
                ProgressReport::Attempts { worker_id: 3, count: 100 },
                ProgressReport::Exhausted { worker_id: 3 },
            ]
        );
    }

    #[test]
    fn test_progress_every_step() {
        let (tx, rx) = unbounded();
        let worker = SearchWorker::new(0, unreachable_pattern(), 25, 110, tx, StopSignal::new());

        assert_eq!(worker.run(), WorkerState::BudgetExhausted);
        drop(worker);

        let reports: Vec<_> = rx.iter().collect();
        let progress: u64 = reports
            .iter()
            .filter_map(|r| match r {
                ProgressReport::Attempts { count, .. } => Some(*count),
                _ => None,
            })
            .sum();
        assert_eq!(progress, 100);
        assert_eq!(reports.len(), 5);
        assert!(matches!(reports.last(), Some(ProgressReport::Exhausted { .. })));
    }

    #[test]
    fn test_empty_pattern_found_on_first_attempt() {
        let (tx, rx) = unbounded();
        let pattern = Arc::new(SearchPattern::default());
        let worker = SearchWorker::new(1, pattern, 50, 1_000, tx, StopSignal::new());

        assert_eq!(worker.run(), WorkerState::Found);
        drop(worker);

        let reports: Vec<_> = rx.iter().collect();
        assert_eq!(reports.len(), 1);
        let ProgressReport::Found(result) = &reports[0] else {
            panic!("expected a match, got {:?}", reports[0]);
        };
        assert_eq!(result.attempts, 1);
        assert_eq!(result.worker_id, 1);
        assert_eq!(result.private_key.len(), 64);
        assert!(result.address.starts_with("0x"));

        let key: [u8; 32] = hex::decode(&result.private_key).unwrap().try_into().unwrap();
        let derived = Keypair::from_secret_key(key).unwrap();
        assert_eq!(derived.address().to_checksum(), result.address);
    }

    #[test]
    fn test_stops_within_one_step() {
        let (tx, rx) = unbounded();
        let stop = StopSignal::new();
        stop.trigger();
        let worker = SearchWorker::new(0, unreachable_pattern(), 20, u64::MAX, tx, stop);

        assert_eq!(worker.run(), WorkerState::Cancelled);
        drop(worker);

        let reports: Vec<_> = rx.iter().collect();
        assert_eq!(reports, vec![ProgressReport::Attempts { worker_id: 0, count: 20 }]);
    }

    #[test]
    fn test_closed_channel_cancels() {
        let (tx, rx) = unbounded();
        drop(rx);
        let worker = SearchWorker::new(0, unreachable_pattern(), 10, u64::MAX, tx, StopSignal::new());
        assert_eq!(worker.run(), WorkerState::Cancelled);
    }
}
