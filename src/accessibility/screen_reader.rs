//! Screen reader support through a polite live region.
//!
//! Announcements are queued with their creation time. Only the newest entry
//! younger than [`ANNOUNCEMENT_TTL`] is rendered; once it ages out the region
//! is empty again.

use crate::html;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// How long an announcement stays in the live region.
pub const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(3);

/// Entries kept at most; older ones are dropped first.
const MAX_QUEUED: usize = 16;

/// Trait for providing screen reader support.
pub trait ScreenReaderSupport: Send + Sync {
    /// Announce a message to assistive technology.
    fn announce(&self, message: &str);

    /// Message currently rendered in the live region, if any.
    fn current_announcement(&self) -> Option<String>;
}

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A queued announcement.
#[derive(Debug, Clone)]
struct Announcement {
    message: String,
    created_at: Instant,
}

/// Live region contents at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveRegion {
    content: String,
}

impl LiveRegion {
    /// Text read by assistive technology (empty when idle).
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Visually hidden status element, mounted once in the document.
    pub fn render_html(&self) -> String {
        format!(
            "<div role=\"status\" aria-live=\"polite\" aria-atomic=\"true\" class=\"sr-only\">{}</div>",
            html::escape(&self.content)
        )
    }
}

/// Live-region announcer.
pub struct Announcer {
    queue: Mutex<VecDeque<Announcement>>,
    clock: Arc<dyn Clock>,
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer {
    /// Announcer on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            clock,
        }
    }

    /// Drop expired entries. Hosts call this from a timer; reads also prune.
    pub fn tick(&self) {
        let now = self.clock.now();
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        Self::prune(&mut queue, now);
    }

    /// Current live region.
    pub fn live_region(&self) -> LiveRegion {
        LiveRegion {
            content: self.current_announcement().unwrap_or_default(),
        }
    }

    /// Number of unexpired entries.
    pub fn pending(&self) -> usize {
        let now = self.clock.now();
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        Self::prune(&mut queue, now);
        queue.len()
    }

    fn prune(queue: &mut VecDeque<Announcement>, now: Instant) {
        while let Some(front) = queue.front() {
            if now.saturating_duration_since(front.created_at) >= ANNOUNCEMENT_TTL {
                queue.pop_front();
            } else {
                break;
            }
        }
    }
}

impl ScreenReaderSupport for Announcer {
    fn announce(&self, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            tracing::debug!("Dropping empty announcement");
            return;
        }

        let now = self.clock.now();
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        Self::prune(&mut queue, now);
        if queue.len() == MAX_QUEUED {
            queue.pop_front();
        }
        queue.push_back(Announcement {
            message: message.to_string(),
            created_at: now,
        });

        tracing::debug!("Screen reader announce: {}", message);
    }

    fn current_announcement(&self) -> Option<String> {
        let now = self.clock.now();
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        Self::prune(&mut queue, now);
        queue.back().map(|a| a.message.clone())
    }
}
