use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::Serialize;

use super::path::VirtualPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Changed,
    Created,
    Deleted,
}

/// Fired after a mutation succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: VirtualPath,
}

impl ChangeEvent {
    pub fn changed(path: VirtualPath) -> Self {
        Self {
            kind: ChangeKind::Changed,
            path,
        }
    }

    pub fn created(path: VirtualPath) -> Self {
        Self {
            kind: ChangeKind::Created,
            path,
        }
    }

    pub fn deleted(path: VirtualPath) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            path,
        }
    }
}

type Handler = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: BTreeMap<u64, Handler>,
}

/// Process-lifetime list of change subscribers.
#[derive(Clone, Default)]
pub struct ChangeNotifier(Arc<Mutex<Registry>>);

/// Token returned by [`ChangeNotifier::subscribe`].
///
/// Dropping the token keeps the handler registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove the handler. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.lock().handlers.remove(&self.id).is_some(),
            None => false,
        }
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let mut registry = self.0.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.insert(id, Arc::new(handler));
        Subscription {
            id,
            registry: Arc::downgrade(&self.0),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.lock().handlers.len()
    }

    /// Deliver `event` to every current subscriber, in subscription order.
    pub fn fire(&self, event: ChangeEvent) {
        // Handlers run outside the lock so they may subscribe or unsubscribe
        let handlers: Vec<Handler> = self.0.lock().handlers.values().cloned().collect();
        tracing::trace!(
            "firing {:?} for {} to {} subscriber(s)",
            event.kind,
            event.path,
            handlers.len()
        );
        for handler in handlers {
            handler(&event);
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_fire() {
        let notifier = ChangeNotifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let _sub = notifier.subscribe(move |event| sink.lock().push(event.clone()));

        let path = VirtualPath::new("b", "a.txt");
        notifier.fire(ChangeEvent::changed(path.clone()));

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, ChangeKind::Changed);
        assert_eq!(seen[0].path, path);
    }

    #[test]
    fn test_unsubscribe() {
        let notifier = ChangeNotifier::new();
        let count = Arc::new(Mutex::new(0));

        let counter = count.clone();
        let sub = notifier.subscribe(move |_| *counter.lock() += 1);
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.fire(ChangeEvent::deleted(VirtualPath::new("b", "x")));
        assert!(sub.unsubscribe());
        notifier.fire(ChangeEvent::deleted(VirtualPath::new("b", "x")));

        assert_eq!(*count.lock(), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_from_handler() {
        let notifier = ChangeNotifier::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let inner = slot.clone();
        let sub = notifier.subscribe(move |_| {
            if let Some(sub) = inner.lock().take() {
                sub.unsubscribe();
            }
        });
        *slot.lock() = Some(sub);

        notifier.fire(ChangeEvent::created(VirtualPath::new("b", "x")));
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
