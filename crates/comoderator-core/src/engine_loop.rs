//! The recurring chat tick and per-message processing.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn, Instrument, Span};

use comoderator_protocols::{ChatEntry, EngineEvent, EngineState};

use super::Shared;
use crate::answer::AnswerGenerator;
use crate::dedup::{MessageIdentity, SeenSet};
use crate::events::EventBus;
use crate::filter::QuestionFilter;
use crate::monitor::ChatMonitor;
use crate::poster::ChatPoster;

pub(super) struct MonitorLoop {
    pub monitor: ChatMonitor,
    pub poster: ChatPoster,
    pub generator: Arc<AnswerGenerator>,
    pub filter: Arc<dyn QuestionFilter>,
    pub shared: Arc<Shared>,
    pub poll_interval: Duration,
    pub seen_capacity: usize,
}

impl MonitorLoop {
    /// Tick until cancelled or the browser is lost.
    ///
    /// The seen set lives in this task only. Per-message work is spawned, so
    /// tick cadence does not depend on answer latency.
    pub async fn run(self, cancel: CancellationToken) {
        let mut seen = SeenSet::new(self.seen_capacity);
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let snapshot = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.monitor.extract() => result,
            };

            match snapshot {
                Ok(entries) if entries.is_empty() => {}
                Ok(entries) => self.dispatch(entries, &mut seen),
                Err(e) if e.is_session_lost() => {
                    error!("Browser connection lost, stopping chat monitoring: {}", e);
                    self.shared.transition(EngineState::Failed);
                    break;
                }
                Err(e) => warn!("Chat monitoring tick failed: {}", e),
            }
        }

        debug!("Chat monitor stopped");
    }

    fn dispatch(&self, entries: Vec<ChatEntry>, seen: &mut SeenSet) {
        for entry in entries {
            if !seen.insert(MessageIdentity::of(&entry)) {
                continue;
            }

            self.shared
                .events()
                .publish(EngineEvent::ChatMessage(entry.clone()));

            if !self.filter.is_question(&entry) {
                continue;
            }

            let generator = self.generator.clone();
            let poster = self.poster.clone();
            let events = self.shared.events().clone();
            tokio::spawn(
                process_entry(entry, generator, poster, events).instrument(Span::current()),
            );
        }
    }
}

/// Answer one question and post it. Failures become events.
async fn process_entry(
    entry: ChatEntry,
    generator: Arc<AnswerGenerator>,
    poster: ChatPoster,
    events: EventBus,
) {
    let answer = match generator.generate(&entry).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Processing error for message from {}: {}", entry.sender, e);
            events.publish(EngineEvent::ProcessingError {
                error: e.to_string(),
                original_entry: entry,
            });
            return;
        }
    };

    if let Err(e) = poster.post(&answer.answer).await {
        warn!("{}", e);
        events.publish(EngineEvent::PostError {
            error: e.to_string(),
            attempted_text: answer.answer.clone(),
        });
    } else {
        debug!("Posted answer to question from {}", entry.sender);
    }

    events.publish(EngineEvent::AiResponse(answer));
}
