//! Waypoint store.
//!
//! Holds the three user inputs. Every applied [`InputEvent`] is one discrete
//! change and leads to exactly one planning pass; a [`InputEvent::Batch`]
//! groups several mutations into a single change.

use tokio::sync::watch;

use crate::domain::{TargetTime, Waypoint};

/// A change emitted by an input collaborator (search box, map click, time
/// slider).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    StartSelected(Waypoint),
    StartCleared,
    EndSelected(Waypoint),
    EndCleared,
    TimeChanged(TargetTime),
    /// Several mutations forming one logical update.
    Batch(Vec<InputEvent>),
}

/// Snapshot of the current inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoints {
    pub start: Option<Waypoint>,
    pub end: Option<Waypoint>,
    pub time: TargetTime,
}

/// Current start, end and target time.
///
/// Observers can [`subscribe`](WaypointStore::subscribe) to receive a fresh
/// snapshot after every applied change.
pub struct WaypointStore {
    current: Waypoints,
    revision: u64,
    notify: watch::Sender<Waypoints>,
}

impl WaypointStore {
    /// Both waypoints start absent.
    pub fn new(time: TargetTime) -> Self {
        let current = Waypoints {
            start: None,
            end: None,
            time,
        };
        let (notify, _) = watch::channel(current);
        Self {
            current,
            revision: 0,
            notify,
        }
    }

    pub fn set_start(&mut self, start: Option<Waypoint>) -> &Waypoints {
        self.current.start = start;
        self.publish()
    }

    pub fn set_end(&mut self, end: Option<Waypoint>) -> &Waypoints {
        self.current.end = end;
        self.publish()
    }

    pub fn set_time(&mut self, time: TargetTime) -> &Waypoints {
        self.current.time = time;
        self.publish()
    }

    /// Apply one event as a single change.
    pub fn apply(&mut self, event: InputEvent) -> &Waypoints {
        self.mutate(event);
        self.publish()
    }

    fn mutate(&mut self, event: InputEvent) {
        match event {
            InputEvent::StartSelected(wp) => self.current.start = Some(wp),
            InputEvent::StartCleared => self.current.start = None,
            InputEvent::EndSelected(wp) => self.current.end = Some(wp),
            InputEvent::EndCleared => self.current.end = None,
            InputEvent::TimeChanged(time) => self.current.time = time,
            InputEvent::Batch(events) => {
                for event in events {
                    self.mutate(event);
                }
            }
        }
    }

    fn publish(&mut self) -> &Waypoints {
        self.revision += 1;
        self.notify.send_replace(self.current);
        &self.current
    }

    pub fn snapshot(&self) -> &Waypoints {
        &self.current
    }

    /// Number of changes applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive a snapshot after each change.
    pub fn subscribe(&self) -> watch::Receiver<Waypoints> {
        self.notify.subscribe()
    }
}
