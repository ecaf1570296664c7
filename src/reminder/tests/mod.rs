//! Unit tests for deadline reminders.
