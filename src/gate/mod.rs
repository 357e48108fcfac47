//! Wake Gate
//!
//! Per-session state machine deciding whether a just-recognized utterance
//! is dispatched downstream or suppressed. A session wakes when a
//! configured wake word appears in the transcript (substring match, word
//! left in place), stays awake while utterances keep arriving within the
//! inactivity timeout, and goes back to sleep either lazily on timeout or
//! immediately after one allowed utterance in single-utterance mode.
//!
//! Timeout sleep is checked lazily at the next gate evaluation; there is no
//! background timer.

pub mod wake_words;

pub use wake_words::WakeWords;

use crate::config::Config;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Map size at which an eviction sweep runs
const SWEEP_THRESHOLD: usize = 1024;

/// Sessions idle longer than this multiple of the auto-sleep timeout are
/// eviction candidates
const IDLE_EVICT_FACTOR: u64 = 10;

/// Eviction floor, so a zero/short timeout never evicts live sessions
const MIN_IDLE_EVICT: Duration = Duration::from_secs(300);

/// Gate settings, built once at construction
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub wake_words: WakeWords,
    /// Sleep immediately after one allowed utterance
    pub auto_sleep: bool,
    /// Inactivity timeout in seconds; 0 disables timeout-based sleep
    pub auto_sleep_seconds: u64,
}

impl GateConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            wake_words: WakeWords::parse(&config.wake_words),
            auto_sleep: config.auto_sleep,
            auto_sleep_seconds: config.auto_sleep_seconds,
        }
    }
}

/// Per-session wake state
struct SessionState {
    awake: bool,
    /// Time of last successful wake or allowed utterance
    last_activity: Option<Instant>,
    /// Time of last gate evaluation, used only for eviction
    last_seen: Instant,
}

/// Outcome of one gate evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    /// Text to forward downstream; empty when dispatch is suppressed
    pub emitted: String,
    /// The unmodified transcript, always available for display
    pub full: String,
}

/// Per-session wake/sleep gate
///
/// Sessions for different identifiers never contend on each other: the
/// outer map lock is held only long enough to clone the per-session slot,
/// and the read-modify-write happens under that session's own lock.
pub struct WakeGate {
    config: GateConfig,
    sessions: Mutex<HashMap<String, Arc<Mutex<SessionState>>>>,
}

impl WakeGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Build a gate from the application config
    pub fn from_config(config: &Config) -> Self {
        Self::new(GateConfig::from_config(config))
    }

    /// Evaluate the gate for one recognized utterance
    ///
    /// Total over any text and session identifier; unknown identifiers are
    /// treated as fresh, asleep sessions. Mutates only this session's state.
    pub fn apply(&self, session_id: &str, text: &str) -> GateDecision {
        self.apply_at(session_id, text, Instant::now())
    }

    fn apply_at(&self, session_id: &str, text: &str, now: Instant) -> GateDecision {
        let slot = self.session(session_id, now);
        let mut state = slot.lock().unwrap_or_else(|e| e.into_inner());
        state.last_seen = now;

        // Lazy timeout-triggered sleep
        if state.awake && self.config.auto_sleep_seconds > 0 {
            if let Some(last) = state.last_activity {
                if now.duration_since(last) > Duration::from_secs(self.config.auto_sleep_seconds)
                {
                    debug!("💤 Session '{}' idle too long, back to sleep", session_id);
                    state.awake = false;
                }
            }
        }

        // First configured word wins; the word stays in the text
        if let Some(word) = self.config.wake_words.first_match(text) {
            if !state.awake {
                debug!("🔔 Session '{}' woken by '{}'", session_id, word);
            }
            state.awake = true;
        }

        if !state.awake {
            // Dispatch suppressed; full text still returned for display
            return GateDecision {
                emitted: String::new(),
                full: text.to_string(),
            };
        }

        state.last_activity = Some(now);
        if self.config.auto_sleep {
            // Single-utterance mode
            state.awake = false;
        }

        GateDecision {
            emitted: text.to_string(),
            full: text.to_string(),
        }
    }

    /// Number of tracked sessions
    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Fetch or lazily create the slot for a session, sweeping stale
    /// entries once the map grows past the threshold
    fn session(&self, session_id: &str, now: Instant) -> Arc<Mutex<SessionState>> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());

        if sessions.len() >= SWEEP_THRESHOLD {
            let ttl = self.idle_evict_after();
            sessions.retain(|_, slot| match slot.try_lock() {
                // Awake sessions are never evicted: with the timeout
                // disabled, eviction would silently reset them to asleep
                Ok(state) => state.awake || now.duration_since(state.last_seen) <= ttl,
                // In use right now, definitely live
                Err(_) => true,
            });
        }

        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(SessionState {
                    awake: false,
                    last_activity: None,
                    last_seen: now,
                }))
            })
            .clone()
    }

    fn idle_evict_after(&self) -> Duration {
        MIN_IDLE_EVICT.max(Duration::from_secs(
            self.config.auto_sleep_seconds.saturating_mul(IDLE_EVICT_FACTOR),
        ))
    }
}
