//! Subscriber registry.
//!
//! Handlers are notified after every applied event, accepted or rejected.
//! A handler is registered either for one instance or for all of them, and
//! handlers run in the order they were registered, across both scopes.

use crate::core::EventRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// What a handler receives.
#[derive(Clone, Copy, Debug)]
pub struct Notification<'a> {
    pub instance_id: &'a str,
    pub record: &'a EventRecord,
}

/// Callback type for notification handlers
pub type Handler = Arc<dyn Fn(&Notification<'_>) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Scope {
    Instance(String),
    All,
}

impl Scope {
    fn covers(&self, instance_id: &str) -> bool {
        match self {
            Self::Instance(id) => id == instance_id,
            Self::All => true,
        }
    }
}

struct Subscription {
    id: SubscriptionId,
    scope: Scope,
    handler: Handler,
}

/// Registry of notification handlers, safe to share between threads.
#[derive(Default)]
pub struct Subscribers {
    entries: RwLock<Vec<Subscription>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one instance.
    pub fn subscribe<F>(&self, instance_id: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: Fn(&Notification<'_>) + Send + Sync + 'static,
    {
        self.insert(Scope::Instance(instance_id.into()), Arc::new(handler))
    }

    /// Register a handler for every instance.
    pub fn subscribe_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Notification<'_>) + Send + Sync + 'static,
    {
        self.insert(Scope::All, Arc::new(handler))
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|s| s.id != id);
        let removed = entries.len() != before;
        if removed {
            tracing::debug!(subscription = %id, "unsubscribed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every handler covering `notification.instance_id`, in
    /// registration order.
    ///
    /// The handler list is copied out before any handler runs, so handlers
    /// may subscribe or unsubscribe; changes apply from the next notification.
    pub fn notify(&self, notification: &Notification<'_>) {
        let handlers: Vec<Handler> = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|s| s.scope.covers(notification.instance_id))
            .map(|s| Arc::clone(&s.handler))
            .collect();

        for handler in handlers {
            handler(notification);
        }
    }

    fn insert(&self, scope: Scope, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        tracing::debug!(subscription = %id, scope = ?scope, "subscribed");
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Subscription { id, scope, handler });
        id
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}
