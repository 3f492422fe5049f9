//! Wall-clock wellness reminders.
//!
//! Each reminder kind fires once its interval has elapsed since it last
//! fired. Last-fired timestamps are kept in the key-value store so the
//! schedule resumes across restarts.

use crate::store::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Store key holding the last-fired timestamps.
pub const TIMERS_KEY: &str = "health-timers";

const MINUTE_MS: i64 = 60 * 1000;

/// Source of the current time, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Water,
    Eyes,
    Posture,
    Break,
    Mental,
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderKind::Water => write!(f, "water"),
            ReminderKind::Eyes => write!(f, "eyes"),
            ReminderKind::Posture => write!(f, "posture"),
            ReminderKind::Break => write!(f, "break"),
            ReminderKind::Mental => write!(f, "mental"),
        }
    }
}

#[derive(Debug)]
pub struct HealthReminder {
    pub kind: ReminderKind,
    pub message: &'static str,
    interval_ms: i64,
}

impl HealthReminder {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }
}

pub static REMINDERS: &[HealthReminder] = &[
    HealthReminder {
        kind: ReminderKind::Water,
        message: "💧 Time for a water break! Stay hydrated while you code! Your brain needs water to function at its best.",
        interval_ms: 60 * MINUTE_MS,
    },
    HealthReminder {
        kind: ReminderKind::Eyes,
        message: "👀 Give your eyes a 20-second break! Look at something 20 feet away. Your vision is precious!",
        interval_ms: 20 * MINUTE_MS,
    },
    HealthReminder {
        kind: ReminderKind::Posture,
        message: "🪑 Check your posture! Sit up straight, shoulders back. Your future self will thank you!",
        interval_ms: 30 * MINUTE_MS,
    },
    HealthReminder {
        kind: ReminderKind::Break,
        message: "🚶 Time for a 5-minute walk! Movement boosts creativity and reduces stress. Go stretch those legs!",
        interval_ms: 90 * MINUTE_MS,
    },
    HealthReminder {
        kind: ReminderKind::Mental,
        message: "🧘 Take a deep breath! Remember: you're doing great, progress isn't always linear, and it's okay to take breaks. You've got this! 💪",
        interval_ms: 120 * MINUTE_MS,
    },
];

/// Tracks when each reminder last fired.
pub struct ReminderScheduler<C: Clock> {
    clock: C,
    last_fired: BTreeMap<ReminderKind, i64>,
}

impl<C: Clock> ReminderScheduler<C> {
    /// Restore timestamps from `store`, starting every missing kind at now.
    ///
    /// A fresh store is initialized and written immediately.
    pub fn load<S: KeyValueStore>(store: &mut S, clock: C) -> Result<Self, StoreError> {
        let now = clock.now_millis();
        let saved: Option<BTreeMap<ReminderKind, i64>> = store.get(TIMERS_KEY)?;
        let fresh = saved.is_none();

        let mut last_fired = saved.unwrap_or_default();
        for reminder in REMINDERS {
            last_fired.entry(reminder.kind).or_insert(now);
        }

        if fresh {
            debug!("Initializing reminder timers at {}", now);
            store.set(TIMERS_KEY, &last_fired)?;
        }

        Ok(Self { clock, last_fired })
    }

    /// Fire every due reminder, reset its timer and persist the timers.
    pub fn tick<S: KeyValueStore>(
        &mut self,
        store: &mut S,
    ) -> Result<Vec<&'static HealthReminder>, StoreError> {
        let now = self.clock.now_millis();
        let mut fired = Vec::new();

        for reminder in REMINDERS {
            let last = self.last_fired.get(&reminder.kind).copied().unwrap_or(now);
            if now - last >= reminder.interval_ms {
                info!("Reminder due: {}", reminder.kind);
                self.last_fired.insert(reminder.kind, now);
                fired.push(reminder);
            }
        }

        if !fired.is_empty() {
            store.set(TIMERS_KEY, &self.last_fired)?;
        }

        Ok(fired)
    }

    /// Time until the next reminder becomes due (zero if one is overdue).
    pub fn next_due_in(&self) -> Option<(ReminderKind, Duration)> {
        let now = self.clock.now_millis();
        REMINDERS
            .iter()
            .map(|r| {
                let last = self.last_fired.get(&r.kind).copied().unwrap_or(now);
                let remaining = (last + r.interval_ms - now).max(0);
                (r.kind, remaining)
            })
            .min_by_key(|(_, remaining)| *remaining)
            .map(|(kind, ms)| (kind, Duration::from_millis(ms as u64)))
    }
}
