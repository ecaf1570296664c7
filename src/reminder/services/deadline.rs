//! Batch job that reminds users about imminent deadlines.

use crate::config::{DEFAULT_REMINDER_WINDOW_HOURS, TaskmateConfig};
use crate::error::{Classify, ErrorKind};
use crate::reminder::{
    domain::{ReminderBatchReport, ReminderMessage},
    ports::ReminderSender,
};
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use chrono::{DateTime, TimeDelta, Utc};
use minijinja::{Environment, context};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

const REMINDER_TEMPLATE: &str = "\
Hello {{ name }},

{{ tasks | length }} of your tasks {% if tasks | length == 1 %}is{% else %}are{% endif %} due soon:
{% for task in tasks %}
- {{ task.title }} (due {{ task.deadline }}, {{ task.priority }} priority)
{%- endfor %}
";

/// Service-level errors for the reminder batch.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Loading pending tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Loading recipients failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The window reaches past the latest representable instant.
    #[error("reminder window of {window} overflows the calendar")]
    WindowOverflow {
        /// Configured look-ahead window.
        window: TimeDelta,
    },
}

impl Classify for ReminderError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Tasks(err) => err.kind(),
            Self::Users(err) => err.kind(),
            Self::WindowOverflow { .. } => ErrorKind::Validation,
        }
    }
}

/// Result type for the reminder batch.
pub type ReminderResult<T> = Result<T, ReminderError>;

#[derive(Debug, Serialize)]
struct TaskLine<'a> {
    title: &'a str,
    deadline: &'a str,
    priority: &'a str,
}

/// Deadline reminder batch service.
#[derive(Clone)]
pub struct DeadlineReminderService<T, U, S, C>
where
    T: TaskRepository,
    U: UserRepository,
    S: ReminderSender,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    sender: Arc<S>,
    clock: Arc<C>,
    window: TimeDelta,
}

impl<T, U, S, C> DeadlineReminderService<T, U, S, C>
where
    T: TaskRepository,
    U: UserRepository,
    S: ReminderSender,
    C: Clock + Send + Sync,
{
    /// Creates a reminder service with the default 24 hour window.
    #[must_use]
    pub fn new(tasks: Arc<T>, users: Arc<U>, sender: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            sender,
            clock,
            window: TimeDelta::hours(i64::from(DEFAULT_REMINDER_WINDOW_HOURS)),
        }
    }

    /// Overrides the look-ahead window.
    #[must_use]
    pub const fn with_window(mut self, window: TimeDelta) -> Self {
        self.window = window;
        self
    }

    /// Applies the configured look-ahead window.
    #[must_use]
    pub fn with_config(self, config: &TaskmateConfig) -> Self {
        self.with_window(config.reminder_window())
    }

    /// Sends one reminder per user with pending tasks due between now and
    /// now plus the window, inclusive.
    ///
    /// Deadlines that cannot be read as a timestamp are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::WindowOverflow`] when now plus the window is
    /// not a representable instant, otherwise [`ReminderError`] when tasks or
    /// recipients cannot be loaded. Individual delivery failures are counted
    /// in the report instead.
    pub async fn send_due_reminders(&self) -> ReminderResult<ReminderBatchReport> {
        let now = self.clock.utc();
        let due = self.due_tasks_by_owner(now).await?;
        if due.is_empty() {
            tracing::debug!("no deadlines inside the reminder window");
            return Ok(ReminderBatchReport::default());
        }

        let owners: Vec<UserId> = due.keys().copied().collect();
        let recipients: BTreeMap<UserId, User> = self
            .users
            .find_many(&owners)
            .await?
            .into_iter()
            .map(|user| (user.id(), user))
            .collect();

        let mut report = ReminderBatchReport::default();
        for (owner, tasks) in due {
            let Some(user) = recipients.get(&owner) else {
                tracing::warn!(user_id = %owner, "skipping reminders for unknown user");
                continue;
            };
            report.recipients += 1;
            match self.deliver(user, &tasks).await {
                Ok(()) => report.sent += 1,
                Err(reason) => {
                    tracing::warn!(user_id = %owner, %reason, "reminder not delivered");
                    report.failed += 1;
                }
            }
        }
        tracing::info!(
            recipients = report.recipients,
            sent = report.sent,
            failed = report.failed,
            "reminder batch finished"
        );
        Ok(report)
    }

    async fn due_tasks_by_owner(
        &self,
        now: DateTime<Utc>,
    ) -> ReminderResult<BTreeMap<UserId, Vec<(DateTime<Utc>, Task)>>> {
        let window_end = now
            .checked_add_signed(self.window)
            .ok_or(ReminderError::WindowOverflow {
                window: self.window,
            })?;
        let mut due: BTreeMap<UserId, Vec<(DateTime<Utc>, Task)>> = BTreeMap::new();
        for task in self.tasks.list_all_by_status(TaskStatus::Pending).await? {
            let Some(deadline) = task.deadline().as_utc() else {
                continue;
            };
            if deadline < now || deadline > window_end {
                continue;
            }
            due.entry(task.owner_id()).or_default().push((deadline, task));
        }
        for tasks in due.values_mut() {
            tasks.sort_by_key(|(deadline, _)| *deadline);
        }
        Ok(due)
    }

    async fn deliver(&self, user: &User, tasks: &[(DateTime<Utc>, Task)]) -> Result<(), String> {
        let message = render_message(user, tasks).map_err(|err| err.to_string())?;
        self.sender
            .send(&message)
            .await
            .map_err(|err| err.to_string())
    }
}

fn render_message(
    user: &User,
    tasks: &[(DateTime<Utc>, Task)],
) -> Result<ReminderMessage, minijinja::Error> {
    let lines: Vec<TaskLine<'_>> = tasks
        .iter()
        .map(|(_, task)| TaskLine {
            title: task.title().as_str(),
            deadline: task.deadline().as_str(),
            priority: task.priority().as_str(),
        })
        .collect();
    let body = Environment::new().render_str(
        REMINDER_TEMPLATE,
        context! { name => user.name().as_str(), tasks => lines },
    )?;
    let subject = match tasks.len() {
        1 => "Taskmate: 1 task due soon".to_owned(),
        count => format!("Taskmate: {count} tasks due soon"),
    };
    Ok(ReminderMessage {
        user_id: user.id(),
        email: user.email().clone(),
        subject,
        body,
        task_ids: tasks.iter().map(|(_, task)| task.id()).collect(),
    })
}
