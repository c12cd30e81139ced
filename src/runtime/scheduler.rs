use crate::runtime::event::AppEvent;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    /// Emit `event` once `delay` has passed, unless `key` is cancelled first.
    EmitAfter {
        key: String,
        delay: Duration,
        event: AppEvent,
    },
    Cancel {
        key: String,
    },
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    guard: Guard,
    event: AppEvent,
}

/// Timer queue driven by explicit instants, so it runs the same under the
/// terminal loop and under a scripted replay.
#[derive(Default)]
pub struct Scheduler {
    ready: VecDeque<AppEvent>,
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::EmitAfter { key, delay, event } => {
                let version = *self.key_versions.entry(key.clone()).or_insert(0);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
            }
        }
    }

    /// Moves every task due at `now` to the ready queue, in due order, and
    /// drains it. Cancelled tasks are dropped.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<AppEvent> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.delayed)
            .into_iter()
            .partition(|task| task.due_at <= now);
        self.delayed = pending;

        due.sort_by_key(|task| task.due_at);
        for task in due {
            if self.task_is_valid(&task) {
                self.ready.push_back(task.event);
            }
        }

        self.ready.drain(..).collect()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.delayed
            .iter()
            .map(|task| task.due_at.saturating_duration_since(now))
            .fold(default_timeout, Duration::min)
    }

    /// Due time of the latest delayed task, if any.
    pub fn last_due(&self) -> Option<Instant> {
        self.delayed.iter().map(|task| task.due_at).max()
    }

    fn task_is_valid(&self, task: &DelayedTask) -> bool {
        let current = self.key_versions.get(&task.guard.key).copied().unwrap_or(0);
        current == task.guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}

#[cfg(test)]
mod tests {
    use super::{Scheduler, SchedulerCommand};
    use crate::core::NodeId;
    use crate::runtime::event::{AppEvent, SystemEvent};
    use std::time::{Duration, Instant};

    fn teardown(id: &str) -> AppEvent {
        AppEvent::System(SystemEvent::Teardown {
            target: NodeId::from(id),
        })
    }

    fn targets(events: &[AppEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| match event {
                AppEvent::System(SystemEvent::Teardown { target }) => Some(target.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn delayed_event_fires_only_when_due() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            SchedulerCommand::EmitAfter {
                key: "a".into(),
                delay: Duration::from_millis(200),
                event: teardown("a"),
            },
            start,
        );

        assert!(scheduler.drain_ready(start + Duration::from_millis(199)).is_empty());
        let fired = scheduler.drain_ready(start + Duration::from_millis(200));
        assert_eq!(targets(&fired), vec!["a"]);
        assert!(scheduler.last_due().is_none());
    }

    #[test]
    fn cancel_drops_tasks_scheduled_before_it() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let emit = || SchedulerCommand::EmitAfter {
            key: "a".into(),
            delay: Duration::from_millis(100),
            event: teardown("a"),
        };
        scheduler.schedule(emit(), start);
        scheduler.schedule(SchedulerCommand::Cancel { key: "a".into() }, start);
        assert!(scheduler.drain_ready(start + Duration::from_secs(1)).is_empty());

        scheduler.schedule(emit(), start);
        assert_eq!(
            targets(&scheduler.drain_ready(start + Duration::from_secs(1))),
            vec!["a"]
        );
    }

    #[test]
    fn due_events_come_out_in_time_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        for (key, ms) in [("late", 300), ("early", 100), ("middle", 200)] {
            scheduler.schedule(
                SchedulerCommand::EmitAfter {
                    key: key.into(),
                    delay: Duration::from_millis(ms),
                    event: teardown(key),
                },
                start,
            );
        }
        let fired = scheduler.drain_ready(start + Duration::from_secs(1));
        assert_eq!(targets(&fired), vec!["early", "middle", "late"]);
    }

    #[test]
    fn poll_timeout_shrinks_to_next_due_task() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        let default = Duration::from_millis(120);
        assert_eq!(scheduler.poll_timeout(start, default), default);

        scheduler.schedule(
            SchedulerCommand::EmitAfter {
                key: "a".into(),
                delay: Duration::from_millis(40),
                event: teardown("a"),
            },
            start,
        );
        assert_eq!(scheduler.poll_timeout(start, default), Duration::from_millis(40));
        assert_eq!(scheduler.last_due(), Some(start + Duration::from_millis(40)));
    }
}
