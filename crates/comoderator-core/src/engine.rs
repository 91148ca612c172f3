//! Engine lifecycle: join, monitor, leave.
//!
//! `Idle -> Joining -> Monitoring | Failed`, then `Leaving -> Closed`.
//! One engine drives at most one session at a time.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde_json::json;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};

use comoderator_protocols::{
    BrowserError, BrowserLauncher, BrowserSession, EngineEvent, EngineState, LaunchOptions,
    SelectorCatalog, SessionHandle,
};

use crate::answer::AnswerGenerator;
use crate::dedup::DEFAULT_SEEN_CAPACITY;
use crate::error::EngineError;
use crate::events::EventBus;
use crate::filter::{QuestionFilter, QuestionMarkFilter};
use crate::monitor::ChatMonitor;
use crate::poster::ChatPoster;
use crate::scripts;

#[path = "engine_loop.rs"]
mod engine_loop;
use engine_loop::MonitorLoop;

/// Timing and identity settings for one engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Display name typed on the pre-join screen.
    pub bot_name: String,
    pub launch: LaunchOptions,
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    /// Pause after joining before the first chat tick.
    pub settle: Duration,
    pub poll_interval: Duration,
    pub seen_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bot_name: "Clarify AI Bot".to_string(),
            launch: LaunchOptions::default(),
            navigation_timeout: Duration::from_secs(30),
            selector_timeout: Duration::from_secs(15),
            settle: Duration::from_secs(5),
            poll_interval: Duration::from_millis(2000),
            seen_capacity: DEFAULT_SEEN_CAPACITY,
        }
    }
}

/// State and event publication shared with the monitor task.
pub(crate) struct Shared {
    state: AtomicU8,
    events: EventBus,
}

impl Shared {
    fn state(&self) -> EngineState {
        EngineState::from(self.state.load(Ordering::SeqCst))
    }

    pub(crate) fn transition(&self, state: EngineState) {
        let previous = EngineState::from(self.state.swap(state as u8, Ordering::SeqCst));
        if previous != state {
            info!("Engine state: {} -> {}", previous, state);
            self.events.publish(EngineEvent::StateChanged { state });
        }
    }

    pub(crate) fn events(&self) -> &EventBus {
        &self.events
    }
}

struct ActiveSession {
    browser: Arc<dyn BrowserSession>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The meeting co-moderator engine.
pub struct Engine {
    config: EngineConfig,
    selectors: Arc<SelectorCatalog>,
    launcher: Arc<dyn BrowserLauncher>,
    generator: Arc<AnswerGenerator>,
    filter: Arc<dyn QuestionFilter>,
    shared: Arc<Shared>,
    handle: RwLock<Option<SessionHandle>>,
    /// Held for the whole of `join` and `leave`.
    active: Mutex<Option<ActiveSession>>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        selectors: SelectorCatalog,
        launcher: Arc<dyn BrowserLauncher>,
        generator: AnswerGenerator,
    ) -> Self {
        Self {
            config,
            selectors: Arc::new(selectors),
            launcher,
            generator: Arc::new(generator),
            filter: Arc::new(QuestionMarkFilter),
            shared: Arc::new(Shared {
                state: AtomicU8::new(EngineState::Idle as u8),
                events: EventBus::default(),
            }),
            handle: RwLock::new(None),
            active: Mutex::new(None),
        }
    }

    /// Replace the question filter.
    pub fn with_filter(mut self, filter: Arc<dyn QuestionFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.shared.state()
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<SessionHandle> {
        self.handle.read().clone()
    }

    /// Subscribe to engine events.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.shared.events().subscribe()
    }

    pub fn selectors(&self) -> &SelectorCatalog {
        &self.selectors
    }

    /// Join `meeting_link` and start monitoring its chat.
    ///
    /// Any join-phase failure releases the browser before returning and
    /// leaves the engine `Failed`.
    pub async fn join(&self, meeting_link: &str, session_id: &str) -> Result<(), EngineError> {
        let link = meeting_link.trim();
        if link.is_empty() {
            return Err(EngineError::InvalidInput(
                "meeting link is required".to_string(),
            ));
        }

        let mut active = self.active.lock().await;
        let current = self.state();
        if !current.can_join() {
            return Err(EngineError::InvalidState {
                operation: "join",
                state: current,
            });
        }

        if let Some(stale) = active.take() {
            debug!("Releasing resources of a failed session before rejoining");
            stop_and_release(stale).await;
        }

        let span = info_span!("session", id = %session_id);
        let handle = SessionHandle::new(session_id, link);

        self.shared.transition(EngineState::Joining);
        info!(parent: &span, "Joining meeting {}", link);

        let browser = match self.launcher.launch(&self.config.launch).instrument(span.clone()).await {
            Ok(browser) => browser,
            Err(e) => {
                error!(parent: &span, "Failed to launch browser: {}", e);
                self.shared.transition(EngineState::Failed);
                return Err(match e {
                    BrowserError::LaunchFailed(msg) => EngineError::LaunchError(msg),
                    other => EngineError::LaunchError(other.to_string()),
                });
            }
        };

        if let Err(e) = self.enter_meeting(browser.as_ref(), link).instrument(span.clone()).await {
            error!(parent: &span, "Failed to join meeting: {}", e);
            release(browser.as_ref()).await;
            self.shared.transition(EngineState::Failed);
            return Err(e);
        }

        let cancel = CancellationToken::new();
        let monitor_loop = MonitorLoop {
            monitor: ChatMonitor::new(browser.clone(), self.selectors.clone()),
            poster: ChatPoster::new(browser.clone(), self.selectors.clone()),
            generator: self.generator.clone(),
            filter: self.filter.clone(),
            shared: self.shared.clone(),
            poll_interval: self.config.poll_interval,
            seen_capacity: self.config.seen_capacity,
        };

        *self.handle.write() = Some(handle);
        self.shared.transition(EngineState::Monitoring);
        info!(parent: &span, "Successfully joined meeting");

        let task = tokio::spawn(monitor_loop.run(cancel.clone()).instrument(span));
        *active = Some(ActiveSession {
            browser,
            cancel,
            task,
        });
        Ok(())
    }

    /// Stop monitoring and release the browser.
    ///
    /// A no-op from `Idle` or `Closed`; from `Failed` the engine moves to
    /// `Closed`. Close errors are logged, never returned.
    pub async fn leave(&self) -> Result<(), EngineError> {
        let mut active = self.active.lock().await;

        let Some(session) = active.take() else {
            if self.state() == EngineState::Failed {
                self.shared.transition(EngineState::Closed);
            }
            return Ok(());
        };

        self.shared.transition(EngineState::Leaving);
        stop_and_release(session).await;
        *self.handle.write() = None;
        self.shared.transition(EngineState::Closed);
        info!("Left meeting");
        Ok(())
    }

    async fn enter_meeting(&self, browser: &dyn BrowserSession, link: &str) -> Result<(), EngineError> {
        let timeout = self.config.navigation_timeout;
        match tokio::time::timeout(timeout, browser.navigate(link, timeout)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(EngineError::NavigationTimeout {
                    url: link.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
        }

        let name_input = browser
            .wait_for_any(&self.selectors.name_input, self.config.selector_timeout)
            .await?;
        debug!("Name input matched '{}'", name_input);

        browser
            .evaluate(scripts::CLEAR_INPUT, vec![json!(name_input)])
            .await?;
        browser.type_into(&name_input, &self.config.bot_name).await?;

        if !self.click_join(browser).await {
            debug!("No join button found, submitting with Enter");
            browser.press_enter().await?;
        }

        tokio::time::sleep(self.config.settle).await;
        Ok(())
    }

    /// Click the first join button candidate that exists. Returns whether one was clicked.
    async fn click_join(&self, browser: &dyn BrowserSession) -> bool {
        for selector in &self.selectors.join_button {
            match browser.query(selector).await {
                Ok(true) => match browser.click(selector).await {
                    Ok(()) => {
                        debug!("Clicked join button '{}'", selector);
                        return true;
                    }
                    Err(e) => debug!("Join button '{}' not clickable: {}", selector, e),
                },
                Ok(false) => {}
                Err(e) => debug!("Join button lookup '{}' failed: {}", selector, e),
            }
        }
        false
    }
}

/// Cancel the monitor task, wait for it, then release page and browser.
async fn stop_and_release(mut session: ActiveSession) {
    session.cancel.cancel();
    if let Err(e) = (&mut session.task).await {
        warn!("Chat monitor task ended abnormally: {}", e);
    }
    release(session.browser.as_ref()).await;
}

/// Close page then browser, logging failures.
async fn release(browser: &dyn BrowserSession) {
    if let Err(e) = browser.close_page().await {
        warn!("Error closing page: {}", e);
    }
    if let Err(e) = browser.close_browser().await {
        warn!("Error closing browser: {}", e);
    }
}
