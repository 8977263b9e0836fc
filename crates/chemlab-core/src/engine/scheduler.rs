use crate::core::models::compound::Compound;
use crate::core::models::element::Element;
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

new_key_type! {
    /// Identifies one scheduled trigger.
    pub struct TaskKey;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeferredTask {
    /// Evaluate the recipe table against the reactants present when the check was triggered.
    /// Results are appended to whatever the beaker holds when the task fires.
    ResolveReaction {
        elements: Vec<Element>,
        compounds: Vec<Compound>,
    },
    /// End the stirring animation.
    SettleStir,
}

impl DeferredTask {
    pub fn label(&self) -> &'static str {
        match self {
            DeferredTask::ResolveReaction { .. } => "resolve-reaction",
            DeferredTask::SettleStir => "settle-stir",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    pub task: DeferredTask,
    pub scheduled_at: Duration,
    pub due: Duration,
}

#[derive(Debug, PartialEq, Eq)]
struct Deadline {
    due: Duration,
    seq: u64,
    key: TaskKey,
}

// Reversed so the max-heap pops the earliest deadline; equal deadlines pop in scheduling order.
impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Fixed-delay tasks on a logical clock. Once scheduled a task cannot be cancelled; it fires when
/// the clock is advanced past its deadline.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    tasks: SlotMap<TaskKey, ScheduledTask>,
    queue: BinaryHeap<Deadline>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn get(&self, key: TaskKey) -> Option<&ScheduledTask> {
        self.tasks.get(key)
    }

    pub fn schedule(&mut self, delay: Duration, task: DeferredTask) -> TaskKey {
        let due = self.now + delay;
        let key = self.tasks.insert(ScheduledTask {
            task,
            scheduled_at: self.now,
            due,
        });
        self.queue.push(Deadline {
            due,
            seq: self.next_seq,
            key,
        });
        self.next_seq += 1;
        key
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|d| d.due)
    }

    /// Removes the earliest task due at or before `until` and moves the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskKey, ScheduledTask)> {
        if self.queue.peek()?.due > until {
            return None;
        }
        let deadline = self.queue.pop()?;
        let task = self.tasks.remove(deadline.key)?;
        self.now = self.now.max(deadline.due);
        Some((deadline.key, task))
    }

    /// Moves the clock forward to `to`. The clock never runs backwards.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn reaction() -> DeferredTask {
        DeferredTask::ResolveReaction {
            elements: Vec::new(),
            compounds: Vec::new(),
        }
    }

    #[test]
    fn tasks_pop_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        let resolve = scheduler.schedule(ms(2000), reaction());
        let stir = scheduler.schedule(ms(1000), DeferredTask::SettleStir);
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.next_deadline(), Some(ms(1000)));

        let (first, task) = scheduler.pop_due(ms(5000)).unwrap();
        assert_eq!(first, stir);
        assert_eq!(task.task, DeferredTask::SettleStir);
        assert_eq!(scheduler.now(), ms(1000));

        let (second, task) = scheduler.pop_due(ms(5000)).unwrap();
        assert_eq!(second, resolve);
        assert_eq!(task.due, ms(2000));
        assert!(scheduler.pop_due(ms(5000)).is_none());
    }

    #[test]
    fn equal_deadlines_pop_in_scheduling_order() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(ms(2000), reaction());
        let b = scheduler.schedule(ms(2000), reaction());
        assert_eq!(scheduler.pop_due(ms(2000)).unwrap().0, a);
        assert_eq!(scheduler.pop_due(ms(2000)).unwrap().0, b);
    }

    #[test]
    fn tasks_not_yet_due_stay_queued() {
        let mut scheduler = Scheduler::new();
        let key = scheduler.schedule(ms(2000), reaction());
        assert!(scheduler.pop_due(ms(1999)).is_none());
        assert!(scheduler.get(key).is_some());
        assert_eq!(scheduler.now(), Duration::ZERO);
    }

    #[test]
    fn delays_are_relative_to_the_current_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_clock(ms(500));
        let key = scheduler.schedule(ms(2000), reaction());
        let task = scheduler.get(key).unwrap();
        assert_eq!(task.scheduled_at, ms(500));
        assert_eq!(task.due, ms(2500));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_clock(ms(300));
        scheduler.advance_clock(ms(100));
        assert_eq!(scheduler.now(), ms(300));
    }
}
