//! Visibility events and scoped subscriptions to them.

use crate::navigation::Screen;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::debug;

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Screen, Callback)>,
}

/// Fan-out of "screen became visible" events.
#[derive(Clone, Default)]
pub struct VisibilityHub {
    listeners: Arc<Mutex<Listeners>>,
}

impl std::fmt::Debug for VisibilityHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityHub")
            .field("listeners", &self.lock().entries.len())
            .finish()
    }
}

impl VisibilityHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers `callback` for every visibility gain of `screen`.
    pub fn on_became_visible(&self, screen: Screen, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut listeners = self.lock();
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.entries.push((id, screen, Arc::new(callback)));
        debug!(?screen, id, "Visibility listener attached");

        Subscription {
            id,
            hub: Arc::downgrade(&self.listeners),
        }
    }

    /// Fires every listener of `screen` exactly once.
    ///
    /// Callbacks run outside the lock so they may subscribe or detach.
    pub fn emit(&self, screen: Screen) {
        let callbacks: Vec<Callback> = self
            .lock()
            .entries
            .iter()
            .filter(|(_, s, _)| *s == screen)
            .map(|(_, _, cb)| Arc::clone(cb))
            .collect();

        for callback in callbacks {
            callback();
        }
    }

    /// Number of listeners currently attached to `screen`.
    pub fn listener_count(&self, screen: Screen) -> usize {
        self.lock().entries.iter().filter(|(_, s, _)| *s == screen).count()
    }
}

/// Detachment handle for a visibility listener.
///
/// Dropping the handle detaches the listener, so the listener never outlives
/// its owner whatever path the owner takes out.
#[must_use = "dropping the subscription detaches the listener immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Detaches the listener now.
    pub fn detach(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut listeners = hub.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        listeners.entries.retain(|(id, _, _)| *id != self.id);
        debug!(id = self.id, "Visibility listener detached");
    }
}

/// Binds a reload trigger to a screen's visibility, once per mount.
///
/// Calling [`LifecycleBinder::mount`] again while mounted keeps the existing
/// listener instead of stacking a second one.
#[derive(Debug, Default)]
pub struct LifecycleBinder {
    subscription: Option<Subscription>,
}

impl LifecycleBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Attaches `on_visible` to `screen` unless already mounted.
    /// Returns whether a new listener was attached.
    pub fn mount(&mut self, hub: &VisibilityHub, screen: Screen, on_visible: impl Fn() + Send + Sync + 'static) -> bool {
        if self.subscription.is_some() {
            return false;
        }
        self.subscription = Some(hub.on_became_visible(screen, on_visible));
        true
    }

    /// Releases the listener, if any.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_fires_on_every_visibility_gain() {
        let hub = VisibilityHub::new();
        let (count, callback) = counter();
        let _sub = hub.on_became_visible(Screen::History, callback);

        for _ in 0..5 {
            hub.emit(Screen::History);
        }
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_other_screens_do_not_fire() {
        let hub = VisibilityHub::new();
        let (count, callback) = counter();
        let _sub = hub.on_became_visible(Screen::History, callback);

        hub.emit(Screen::Search);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_detaches() {
        let hub = VisibilityHub::new();
        let (count, callback) = counter();
        {
            let _sub = hub.on_became_visible(Screen::History, callback);
            assert_eq!(hub.listener_count(Screen::History), 1);
        }
        hub.emit(Screen::History);
        assert_eq!(hub.listener_count(Screen::History), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_binder_mounts_once() {
        let hub = VisibilityHub::new();
        let (count, callback) = counter();
        let (_, second) = counter();
        let mut binder = LifecycleBinder::new();

        assert!(binder.mount(&hub, Screen::History, callback));
        assert!(!binder.mount(&hub, Screen::History, second));
        hub.emit(Screen::History);

        assert_eq!(hub.listener_count(Screen::History), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remount_does_not_duplicate() {
        let hub = VisibilityHub::new();
        let (count, callback) = counter();
        let callback = Arc::new(callback);
        let mut binder = LifecycleBinder::new();

        for _ in 0..3 {
            let cb = Arc::clone(&callback);
            binder.mount(&hub, Screen::History, move || cb());
            hub.emit(Screen::History);
            binder.unmount();
        }

        assert!(!binder.is_mounted());
        assert_eq!(hub.listener_count(Screen::History), 0);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_callback_may_detach_during_emit() {
        let hub = VisibilityHub::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let inner = Arc::clone(&slot);
        let sub = hub.on_became_visible(Screen::History, move || {
            inner.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(sub);

        hub.emit(Screen::History);
        assert_eq!(hub.listener_count(Screen::History), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = VisibilityHub::new();
        let sub = hub.on_became_visible(Screen::History, || {});
        drop(hub);
        sub.detach();
    }
}
