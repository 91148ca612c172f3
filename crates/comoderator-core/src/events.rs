//! Engine event bus.

use tokio::sync::broadcast;
use tracing::{debug, trace};

use comoderator_protocols::EngineEvent;

/// Default number of events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Broadcast publisher of [`EngineEvent`]s.
///
/// Publishing never blocks and never fails; events are dropped when nobody
/// is subscribed. Slow subscribers observe `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: EngineEvent) {
        debug!("Publishing {} event", event.kind());
        if self.sender.send(event).is_err() {
            trace!("No subscribers for engine event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
