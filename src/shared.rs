//! Instances shared between threads.
//!
//! Every instance gets its own lock, so events for one instance are applied
//! one at a time while different instances proceed independently.

use crate::core::{Effect, Event, TicketState};
use crate::engine::{EngineError, WorkflowEngine, WorkflowInstance};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// A workflow instance behind an exclusive lock.
///
/// Cloning shares the same instance.
#[derive(Clone, Debug)]
pub struct SharedInstance {
    id: Arc<str>,
    inner: Arc<Mutex<WorkflowInstance>>,
}

impl SharedInstance {
    pub fn new(instance: WorkflowInstance) -> Self {
        Self {
            id: Arc::from(instance.id()),
            inner: Arc::new(Mutex::new(instance)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Apply `event` while holding this instance's lock.
    pub fn apply(&self, engine: &WorkflowEngine, event: Event) -> Effect {
        let mut instance = self.lock();
        engine.apply_event(&mut instance, event)
    }

    pub fn apply_raw(
        &self,
        engine: &WorkflowEngine,
        kind: &str,
        payload: Option<String>,
    ) -> Result<Effect, EngineError> {
        let mut instance = self.lock();
        engine.apply_raw(&mut instance, kind, payload)
    }

    pub fn state(&self) -> TicketState {
        self.lock().state()
    }

    /// Copy of the instance as it is right now.
    pub fn snapshot(&self) -> WorkflowInstance {
        self.lock().clone()
    }

    // State and log are committed before subscribers run, so an instance
    // whose lock was poisoned by a panicking subscriber is still consistent.
    fn lock(&self) -> MutexGuard<'_, WorkflowInstance> {
        self.inner.lock().unwrap_or_else(|e| {
            tracing::warn!(instance = %self.id, "recovering poisoned instance lock");
            e.into_inner()
        })
    }
}

/// Instances indexed by id, all driven by one engine.
#[derive(Debug)]
pub struct Workflows {
    engine: Arc<WorkflowEngine>,
    instances: RwLock<HashMap<String, SharedInstance>>,
}

impl Workflows {
    pub fn new(engine: Arc<WorkflowEngine>) -> Self {
        Self {
            engine,
            instances: RwLock::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &WorkflowEngine {
        &self.engine
    }

    /// Return the instance named `id`, creating it if needed.
    pub fn open(&self, id: &str) -> SharedInstance {
        if let Some(existing) = self.get(id) {
            return existing;
        }
        let mut instances = self.instances.write().unwrap_or_else(|e| e.into_inner());
        instances
            .entry(id.to_string())
            .or_insert_with(|| SharedInstance::new(self.engine.create(id)))
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<SharedInstance> {
        self.instances
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    pub fn apply(&self, id: &str, event: Event) -> Result<Effect, EngineError> {
        let instance = self.require(id)?;
        Ok(instance.apply(&self.engine, event))
    }

    pub fn apply_raw(
        &self,
        id: &str,
        kind: &str,
        payload: Option<String>,
    ) -> Result<Effect, EngineError> {
        let instance = self.require(id)?;
        instance.apply_raw(&self.engine, kind, payload)
    }

    /// Ids of every instance, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .instances
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.instances
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn require(&self, id: &str) -> Result<SharedInstance, EngineError> {
        self.get(id)
            .ok_or_else(|| EngineError::UnknownInstance(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;
    use std::thread;

    #[test]
    fn open_returns_same_instance() {
        let workflows = Workflows::new(Arc::new(WorkflowEngine::new()));
        let first = workflows.open("T1");
        first.apply(workflows.engine(), Event::assign_agent("Alice"));

        let again = workflows.open("T1");
        assert_eq!(again.state(), TicketState::InProgress);
        assert_eq!(workflows.len(), 1);
    }

    #[test]
    fn apply_to_unknown_instance_fails() {
        let workflows = Workflows::new(Arc::new(WorkflowEngine::new()));
        let err = workflows.apply("missing", Event::close()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownInstance(id) if id == "missing"));
    }

    #[test]
    fn ids_are_sorted() {
        let workflows = Workflows::new(Arc::new(WorkflowEngine::new()));
        workflows.open("T2");
        workflows.open("T1");
        assert_eq!(workflows.ids(), vec!["T1".to_string(), "T2".to_string()]);
    }

    #[test]
    fn snapshot_is_detached() {
        let engine = WorkflowEngine::new();
        let shared = SharedInstance::new(engine.create("T1"));

        let before = shared.snapshot();
        shared.apply(&engine, Event::reply("hello"));

        assert_eq!(before.state(), TicketState::New);
        assert_eq!(shared.state(), TicketState::InProgress);
        assert_eq!(shared.id(), "T1");
    }

    #[test]
    fn concurrent_events_are_serialized_per_instance() {
        let engine = Arc::new(WorkflowEngine::new());
        let shared = SharedInstance::new(engine.create("T1"));

        let workers: Vec<_> = (0..8)
            .map(|n| {
                let engine = Arc::clone(&engine);
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        shared.apply(&engine, Event::reply(format!("worker {n} message {i}")));
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.log().len(), 200);
        let sequences: Vec<_> = snapshot.log().records().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, (0..200).collect::<Vec<_>>());
        assert_eq!(snapshot.state(), TicketState::InProgress);
    }

    #[test]
    fn panicking_subscriber_does_not_corrupt_instance() {
        let engine = Arc::new(WorkflowEngine::new());
        engine.subscribers().subscribe("T1", |n: &Notification<'_>| {
            if n.record.sequence == 0 {
                panic!("subscriber failure");
            }
        });
        let shared = SharedInstance::new(engine.create("T1"));

        let worker = {
            let engine = Arc::clone(&engine);
            let shared = shared.clone();
            thread::spawn(move || shared.apply(&engine, Event::assign_agent("Alice")))
        };
        assert!(worker.join().is_err());

        let effect = shared.apply(&engine, Event::resolve());
        assert!(effect.is_accepted());
        assert_eq!(shared.snapshot().log().len(), 2);
    }
}
