//! Unit tests for the notification channel.
