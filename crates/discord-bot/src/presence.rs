//! Rotating "streaming" presence.

use crate::config::PresenceConfig;
use discord_client::{PresenceSink, StreamingActivity};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Presence handle of the current gateway session, replaced on every ready.
pub type CurrentSink = Arc<RwLock<Option<Arc<dyn PresenceSink>>>>;

/// The set of statuses to rotate through and how often.
#[derive(Debug, Clone)]
pub struct PresenceRotation {
    activities: Vec<String>,
    url: String,
    display_name: String,
    interval: Duration,
}

impl PresenceRotation {
    pub fn new(config: &PresenceConfig) -> Self {
        Self {
            activities: config
                .activities
                .iter()
                .filter(|a| !a.trim().is_empty())
                .cloned()
                .collect(),
            url: config.url.clone(),
            display_name: config.display_name.clone(),
            interval: config.interval,
        }
    }

    /// Pick an activity; every entry is equally likely.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<StreamingActivity> {
        self.activities
            .choose(rng)
            .map(|name| StreamingActivity::new(name.clone(), &self.url, &self.display_name))
    }

    /// Push one randomly chosen activity.
    pub fn update(&self, sink: &dyn PresenceSink) {
        let Some(activity) = self.pick(&mut rand::thread_rng()) else {
            return;
        };
        match sink.set_streaming(&activity) {
            Ok(()) => debug!("Presence updated: {}", activity.name),
            Err(e) => warn!("Failed to update presence: {}", e),
        }
    }

    /// Update every `interval`, starting one interval from now. Never returns.
    ///
    /// Each tick goes to whichever sink is current at that moment.
    pub async fn run(self, sink: CurrentSink) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let current = sink.read().unwrap_or_else(PoisonError::into_inner).clone();
            match current {
                Some(current) => self.update(current.as_ref()),
                None => debug!("No gateway session, skipping presence update"),
            }
        }
    }
}

/// Owns the rotation timer and the sink it writes to.
///
/// The timer starts on the first ready event; later ready events (shard
/// restarts) only swap in the new session's sink.
pub struct PresenceUpdater {
    rotation: PresenceRotation,
    sink: CurrentSink,
    started: AtomicBool,
}

impl PresenceUpdater {
    pub fn new(rotation: PresenceRotation) -> Self {
        Self {
            rotation,
            sink: Arc::new(RwLock::new(None)),
            started: AtomicBool::new(false),
        }
    }

    /// Record the session's sink and spawn the rotation if it is not running.
    ///
    /// Returns the timer task only for the call that started it.
    pub fn on_ready(&self, sink: Arc<dyn PresenceSink>) -> Option<JoinHandle<()>> {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = Some(sink);

        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Presence sink replaced after reconnect");
            return None;
        }
        let rotation = self.rotation.clone();
        Some(tokio::spawn(rotation.run(self.sink.clone())))
    }
}
