//! Poller: schedules fetches and drives responses through the pipeline

use flamewatch_core::{
    Delivery, Pipeline, PipelineState, PollError, RenderSinkAdapter, SharedDataSource,
    SinkError, TransportError,
};
use flamewatch_types::OverlapPolicy;
use log::{debug, error, trace};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};

type FetchResult = (u64, Result<Vec<u8>, TransportError>);

/// What became of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Frame shown
    Applied(u64),
    /// A newer poll was already shown; response discarded
    Stale(u64),
    /// Fetch or decode failed; previous frame still shown
    Failed(u64),
}

/// Periodically fetches from a source and renders the result
///
/// Each tick starts a fetch tagged with a fresh sequence number. Responses
/// are processed in completion order; a response older than the frame on
/// screen is dropped.
pub struct Poller {
    source: SharedDataSource,
    pipeline: Pipeline,
    sinks: RenderSinkAdapter,
    state: PipelineState,
    interval: Duration,
    overlap: OverlapPolicy,
    next_sequence: u64,
    in_flight: JoinSet<FetchResult>,
}

impl Poller {
    /// The adapter must already be initialized
    pub fn new(
        source: SharedDataSource,
        pipeline: Pipeline,
        sinks: RenderSinkAdapter,
        interval: Duration,
        overlap: OverlapPolicy,
    ) -> Self {
        Self {
            source,
            pipeline,
            sinks,
            state: PipelineState::new(),
            interval,
            overlap,
            next_sequence: 0,
            in_flight: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Sequence number of the frame on screen
    pub fn last_applied(&self) -> Option<u64> {
        self.sinks.last_applied()
    }

    /// Start a fetch, unless the overlap policy says to sit this tick out
    pub fn tick(&mut self) -> Option<u64> {
        if self.overlap == OverlapPolicy::Skip && !self.in_flight.is_empty() {
            debug!(
                "Skipping tick: {} fetch(es) still outstanding",
                self.in_flight.len()
            );
            return None;
        }

        self.next_sequence += 1;
        let sequence = self.next_sequence;
        let source = self.source.clone();
        trace!("Poll #{} from '{}'", sequence, source.metadata().id);

        self.in_flight.spawn(async move { (sequence, source.fetch().await) });
        Some(sequence)
    }

    /// Process one finished fetch
    ///
    /// Only a displayer failure is returned as an error.
    pub fn complete(
        &mut self,
        sequence: u64,
        result: Result<Vec<u8>, TransportError>,
    ) -> Result<CycleOutcome, SinkError> {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                error!("Poll #{} failed: {}", sequence, PollError::from(e));
                return Ok(CycleOutcome::Failed(sequence));
            }
        };

        if self.sinks.is_stale(sequence) {
            debug!(
                "Poll #{} finished after a newer one was shown; dropped",
                sequence
            );
            return Ok(CycleOutcome::Stale(sequence));
        }

        let start = Instant::now();
        let state = match self.pipeline.process(&self.state, sequence, &raw) {
            Ok(state) => state,
            Err(e) => {
                error!("Poll #{} failed: {}", sequence, PollError::from(e));
                return Ok(CycleOutcome::Failed(sequence));
            }
        };

        let delivery = match state.frame() {
            Some(frame) => self.sinks.apply(frame)?,
            None => return Ok(CycleOutcome::Failed(sequence)),
        };
        trace!("Poll #{} processed in {:?}", sequence, start.elapsed());

        match delivery {
            Delivery::Applied => {
                self.state = state;
                Ok(CycleOutcome::Applied(sequence))
            }
            Delivery::Stale { .. } => Ok(CycleOutcome::Stale(sequence)),
        }
    }

    /// Wait for the next outstanding fetch and process it
    pub async fn next_completion(&mut self) -> Option<Result<CycleOutcome, SinkError>> {
        let joined = self.in_flight.join_next().await?;
        Some(self.handle_joined(joined))
    }

    fn handle_joined(
        &mut self,
        joined: Result<FetchResult, tokio::task::JoinError>,
    ) -> Result<CycleOutcome, SinkError> {
        match joined {
            Ok((sequence, result)) => self.complete(sequence, result),
            Err(e) => {
                error!("Fetch task failed: {}", e);
                Ok(CycleOutcome::Failed(0))
            }
        }
    }

    /// Run a single cycle to completion
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, SinkError> {
        let Some(sequence) = self.tick() else {
            return Ok(CycleOutcome::Failed(self.next_sequence));
        };
        loop {
            match self.next_completion().await {
                Some(Ok(outcome)) if outcome_sequence(outcome) == sequence => return Ok(outcome),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e),
                None => return Ok(CycleOutcome::Failed(sequence)),
            }
        }
    }

    /// Start the poll loop
    ///
    /// This runs until a displayer fails. Fetch and decode failures are
    /// logged and the next tick is the retry.
    pub async fn run(&mut self) -> Result<(), SinkError> {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick();
                }
                Some(joined) = self.in_flight.join_next() => {
                    self.handle_joined(joined)?;
                }
            }
        }
    }
}

fn outcome_sequence(outcome: CycleOutcome) -> u64 {
    match outcome {
        CycleOutcome::Applied(s) | CycleOutcome::Stale(s) | CycleOutcome::Failed(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flamewatch_core::{DataSource, Displayer, SourceMetadata};
    use flamewatch_displayers::{MemoryDisplayer, MemoryHandle};
    use flamewatch_types::{PipelineConfig, RenderFrame};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    type Scripted = (Duration, Result<Vec<u8>, TransportError>);

    /// Answers each fetch with the next scripted response after its delay
    struct ScriptedSource {
        metadata: SourceMetadata,
        script: Mutex<VecDeque<Scripted>>,
        repeat: Option<Vec<u8>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Scripted>) -> Self {
            Self {
                metadata: SourceMetadata {
                    id: "scripted".to_string(),
                    name: "Scripted".to_string(),
                    description: "scripted responses".to_string(),
                },
                script: Mutex::new(script.into()),
                repeat: None,
            }
        }

        /// Answer every fetch immediately with the same batch
        fn repeating(raw: Vec<u8>) -> Self {
            let mut source = Self::new(Vec::new());
            source.repeat = Some(raw);
            source
        }
    }

    #[async_trait]
    impl DataSource for ScriptedSource {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        async fn fetch(&self) -> Result<Vec<u8>, TransportError> {
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some((delay, result)) => {
                    tokio::time::sleep(delay).await;
                    result
                }
                None => self.repeat.clone().ok_or(TransportError::Request {
                    endpoint: "scripted".to_string(),
                    message: "script exhausted".to_string(),
                }),
            }
        }
    }

    struct BrokenDisplayer;

    impl Displayer for BrokenDisplayer {
        fn id(&self) -> &str {
            "broken"
        }

        fn name(&self) -> &str {
            "Broken"
        }

        fn update_frame(&mut self, _frame: &RenderFrame) -> Result<(), SinkError> {
            Err(SinkError::Io {
                id: "broken".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        }
    }

    fn batch(flame: &[f64]) -> Vec<u8> {
        let records: Vec<_> = flame
            .iter()
            .enumerate()
            .map(|(i, v)| {
                serde_json::json!({
                    "sample_time": format!("2024-01-01T00:{:02}:00Z", i),
                    "device_data": {"flame": v, "gas": 10.0},
                })
            })
            .collect();
        serde_json::to_vec(&records).unwrap()
    }

    fn poller(source: ScriptedSource, overlap: OverlapPolicy) -> (Poller, MemoryHandle) {
        let (memory, handle) = MemoryDisplayer::new();
        let mut sinks = RenderSinkAdapter::new(vec![Box::new(memory)]);
        sinks.initialize().unwrap();
        let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
        let poller = Poller::new(
            Arc::new(source),
            pipeline,
            sinks,
            Duration::from_secs(60),
            overlap,
        );
        (poller, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_does_not_overwrite_newer_frame() {
        let source = ScriptedSource::new(vec![
            (Duration::from_millis(500), Ok(batch(&[1.0, 1.0]))),
            (Duration::from_millis(50), Ok(batch(&[2.0, 2.0, 2.0]))),
        ]);
        let (mut poller, shown) = poller(source, OverlapPolicy::Allow);

        assert_eq!(poller.tick(), Some(1));
        assert_eq!(poller.tick(), Some(2));
        assert_eq!(poller.in_flight(), 2);

        let first = poller.next_completion().await.unwrap().unwrap();
        assert_eq!(first, CycleOutcome::Applied(2));
        let second = poller.next_completion().await.unwrap().unwrap();
        assert_eq!(second, CycleOutcome::Stale(1));

        assert_eq!(shown.sequence(), Some(2));
        assert_eq!(shown.updates(), 1);
        assert_eq!(poller.last_applied(), Some(2));
        assert_eq!(poller.state().series().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_polls_keep_previous_frame() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Ok(batch(&[5.0, 6.0]))),
            (
                Duration::ZERO,
                Err(TransportError::Status {
                    endpoint: "scripted".to_string(),
                    status: 503,
                }),
            ),
            (Duration::ZERO, Ok(b"<html>oops</html>".to_vec())),
            (Duration::ZERO, Ok(batch(&[7.0]))),
        ]);
        let (mut poller, shown) = poller(source, OverlapPolicy::Allow);

        assert_eq!(poller.poll_once().await.unwrap(), CycleOutcome::Applied(1));
        assert_eq!(poller.poll_once().await.unwrap(), CycleOutcome::Failed(2));
        assert_eq!(shown.sequence(), Some(1));
        assert_eq!(poller.state().series().len(), 2);

        assert_eq!(poller.poll_once().await.unwrap(), CycleOutcome::Failed(3));
        assert_eq!(shown.sequence(), Some(1));

        assert_eq!(poller.poll_once().await.unwrap(), CycleOutcome::Applied(4));
        assert_eq!(shown.sequence(), Some(4));
        assert_eq!(shown.updates(), 2);
        assert_eq!(poller.state().series().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_policy_waits_for_outstanding_fetch() {
        let source = ScriptedSource::new(vec![
            (Duration::from_secs(90), Ok(batch(&[1.0]))),
            (Duration::ZERO, Ok(batch(&[2.0]))),
        ]);
        let (mut poller, shown) = poller(source, OverlapPolicy::Skip);

        assert_eq!(poller.tick(), Some(1));
        assert_eq!(poller.tick(), None);
        assert_eq!(poller.in_flight(), 1);

        let outcome = poller.next_completion().await.unwrap().unwrap();
        assert_eq!(outcome, CycleOutcome::Applied(1));

        assert_eq!(poller.tick(), Some(2));
        let outcome = poller.next_completion().await.unwrap().unwrap();
        assert_eq!(outcome, CycleOutcome::Applied(2));
        assert_eq!(shown.updates(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_on_a_fixed_interval() {
        let source = ScriptedSource::repeating(batch(&[3.0, 4.0]));
        let (mut poller, shown) = poller(source, OverlapPolicy::Allow);

        // Ticks at 0s, 60s and 120s
        let result = tokio::time::timeout(Duration::from_secs(150), poller.run()).await;
        assert!(result.is_err());

        assert_eq!(shown.updates(), 3);
        assert_eq!(shown.sequence(), Some(3));
        let frame = shown.frame().unwrap();
        assert_eq!(frame.view("Flame").unwrap().series, vec![3.0, 4.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_when_a_displayer_fails() {
        let mut sinks = RenderSinkAdapter::new(vec![Box::new(BrokenDisplayer)]);
        sinks.initialize().unwrap();
        let mut poller = Poller::new(
            Arc::new(ScriptedSource::repeating(batch(&[1.0]))),
            Pipeline::new(&PipelineConfig::default()).unwrap(),
            sinks,
            Duration::from_secs(60),
            OverlapPolicy::Allow,
        );

        let result = tokio::time::timeout(Duration::from_secs(30), poller.run()).await;
        let err = result.expect("run should return before the timeout").unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
