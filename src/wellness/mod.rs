//! Wellness reminders.

pub mod scheduler;

pub use scheduler::{Clock, HealthReminder, ReminderScheduler, SystemClock};
