//! # Emitter - named-event publish/subscribe.
//!
//! [`Emitter`] owns a registry of listeners per event name and delivers each
//! publish to the listeners registered at that moment, on a later turn of the
//! tokio scheduler.
//!
//! ## Architecture
//! ```text
//! subscribe(name, l) ──┐                          ┌──► Diagnostics (leak warning)
//! subscribe_once ──────┼──► Registry (Mutex) ─────┤
//! unsubscribe ─────────┘     name → [Subscription]└──► Dispatcher ──► tokio task
//!                                  ▲                                  (handlers, FIFO)
//! publish(name, args) ─────────────┘
//!     snapshot + consume once, then dispatch (lock released)
//! ```
//!
//! ## Reserved events
//! - [`NEW_LISTENER`] (`"newListener"`): published by every `subscribe` /
//!   `subscribe_once` **before** the listener is added. Payload:
//!   `(String, Listener)`.
//! - [`REMOVE_LISTENER`] (`"removeListener"`): published by every successful
//!   `unsubscribe` **before** the listener is removed. Payload:
//!   `(String, Listener)`. Not published by `unsubscribe_all`.
//!
//! ## Rules
//! - Delivery order per pass is subscription order.
//! - `publish` returns before any handler of the pass runs on its stack.
//! - The registry lock is never held while user code runs, so handlers and
//!   diagnostics sinks may call back into the emitter.
//! - Clones share one bus; separately built emitters share nothing.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::args;
use crate::error::EmitterError;
use crate::listeners::{Args, Listener};

use super::builder::EmitterBuilder;
use super::dispatch::{Delivery, Dispatcher};
use super::registry::{Registry, Subscription};

/// Reserved event published before a listener is added.
pub const NEW_LISTENER: &str = "newListener";

/// Reserved event published before a listener is individually removed.
pub const REMOVE_LISTENER: &str = "removeListener";

struct Inner {
    registry: Mutex<Registry>,
    dispatcher: Dispatcher,
}

/// In-process event emitter.
///
/// Cheap to clone; all clones operate on the same registry.
#[derive(Clone)]
pub struct Emitter {
    inner: Arc<Inner>,
}

/// Snapshot of a reserved-event pass taken under the registry lock.
type Pending = Option<(Handle, Vec<Listener>)>;

impl Emitter {
    /// Creates an emitter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        EmitterBuilder::default().build()
    }

    /// Returns a builder for custom configuration, diagnostics or runtime handle.
    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::default()
    }

    pub(crate) fn from_parts(registry: Registry, dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(registry),
                dispatcher,
            }),
        }
    }

    /// Adds a persistent listener for `event`.
    ///
    /// The name is stringified with `Display`. `"newListener"` listeners are
    /// notified first; this listener is then appended. Crossing the listener
    /// limit reports a one-time [`LeakWarning`](crate::LeakWarning).
    pub fn subscribe(&self, event: impl fmt::Display, listener: Listener) {
        self.add(event.to_string(), Subscription::Persistent(listener));
    }

    /// Adds a listener that is delivered at most once, then removed.
    pub fn subscribe_once(&self, event: impl fmt::Display, listener: Listener) {
        self.add(event.to_string(), Subscription::Once(listener));
    }

    /// Subscribes a synchronous closure and returns its [`Listener`] handle.
    pub fn subscribe_fn<F>(&self, event: impl fmt::Display, f: F) -> Listener
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let listener = Listener::from_fn(f);
        self.subscribe(event, listener.clone());
        listener
    }

    /// Subscribes a synchronous closure for one delivery and returns its handle.
    pub fn subscribe_once_fn<F>(&self, event: impl fmt::Display, f: F) -> Listener
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let listener = Listener::from_fn(f);
        self.subscribe_once(event, listener.clone());
        listener
    }

    fn add(&self, name: String, sub: Subscription) {
        let listener = sub.listener().clone();

        let (pending, leak) = {
            let mut reg = self.inner.registry.lock();
            let pending = self.take_reserved(&mut reg, NEW_LISTENER);
            let leak = reg.add(name.clone(), sub);
            (pending, leak)
        };
        tracing::trace!(event = %name, listener = listener.name(), "listener added");

        self.notify(NEW_LISTENER, pending, &name, listener);
        if let Some(warning) = leak {
            self.inner.dispatcher.diagnostics().leak_detected(&warning);
        }
    }

    /// Publishes `event` with `args`.
    ///
    /// Every listener registered for `event` when this call starts is scheduled
    /// exactly once, in subscription order; `once` listeners are removed before
    /// this call returns. Handlers run later, on a tokio task.
    ///
    /// # Errors
    /// - [`EmitterError::NoRuntime`] if listeners exist but no runtime is
    ///   available; the registry is left untouched.
    ///
    /// With no listeners this is a no-op returning an empty [`Delivery`].
    ///
    /// # Scheduling
    /// Handlers never run on the stack of this call. On a `current_thread`
    /// runtime they start only after the caller yields. On a multi-thread
    /// runtime the dispatch task may start on another worker as soon as it is
    /// spawned, i.e. before this call has returned to its caller.
    pub fn publish(&self, event: &str, args: Args) -> Result<Delivery, EmitterError> {
        let (rt, listeners) = {
            let mut reg = self.inner.registry.lock();
            if !reg.contains(event) {
                return Ok(Delivery::empty());
            }
            let rt = self.inner.dispatcher.runtime()?;
            (rt, reg.take_for_publish(event))
        };
        Ok(self
            .inner
            .dispatcher
            .dispatch(&rt, event.to_string(), listeners, args))
    }

    /// Removes the first subscription of `listener` under `event`.
    ///
    /// Returns `false` (with no side effects) if it is not registered there.
    /// On success `"removeListener"` listeners are notified first.
    pub fn unsubscribe(&self, event: &str, listener: &Listener) -> bool {
        let pending = {
            let mut reg = self.inner.registry.lock();
            let Some(id) = reg.find(event, listener) else {
                return false;
            };
            let pending = self.take_reserved(&mut reg, REMOVE_LISTENER);
            reg.remove_id(event, id);
            pending
        };
        tracing::trace!(event = %event, listener = listener.name(), "listener removed");

        self.notify(REMOVE_LISTENER, pending, event, listener.clone());
        true
    }

    /// Drops every subscription for `event`, or for all events with `None`.
    ///
    /// Bulk removal does not publish `"removeListener"`.
    pub fn unsubscribe_all(&self, event: Option<&str>) {
        self.inner.registry.lock().clear(event);
        tracing::trace!(event = ?event, "listeners cleared");
    }

    /// Sets the leak-warning threshold (`0` = unlimited).
    ///
    /// Applies to later subscriptions; names that already warned stay warned.
    ///
    /// # Errors
    /// [`EmitterError::InvalidArgument`] if `n` is negative or does not fit `usize`.
    ///
    /// # Example
    /// ```
    /// use eventvisor::{Emitter, EmitterError};
    ///
    /// let bus = Emitter::new();
    /// assert!(bus.set_max_listeners(0).is_ok());
    /// assert!(matches!(
    ///     bus.set_max_listeners(-1),
    ///     Err(EmitterError::InvalidArgument { .. })
    /// ));
    /// ```
    pub fn set_max_listeners<N>(&self, n: N) -> Result<(), EmitterError>
    where
        N: TryInto<usize> + fmt::Debug + Copy,
    {
        let max = n.try_into().map_err(|_| {
            EmitterError::invalid(format!(
                "max listeners must be a non-negative integer, got {n:?}"
            ))
        })?;
        self.inner.registry.lock().set_max_listeners(max);
        Ok(())
    }

    /// Current leak-warning threshold.
    pub fn max_listeners(&self) -> usize {
        self.inner.registry.lock().max_listeners()
    }

    /// Snapshot of the listeners for `event`, in delivery order.
    pub fn listeners(&self, event: &str) -> Vec<Listener> {
        self.inner.registry.lock().listeners(event)
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.registry.lock().count(event)
    }

    /// Sorted names of events that currently have listeners.
    pub fn event_names(&self) -> Vec<String> {
        self.inner.registry.lock().names()
    }

    /// True if the leak warning already fired for the current listeners of `event`.
    pub fn is_warned(&self, event: &str) -> bool {
        self.inner.registry.lock().is_warned(event)
    }

    /// Alias of [`subscribe`](Self::subscribe).
    #[inline]
    pub fn on(&self, event: impl fmt::Display, listener: Listener) {
        self.subscribe(event, listener);
    }

    /// Alias of [`subscribe_once`](Self::subscribe_once).
    #[inline]
    pub fn once(&self, event: impl fmt::Display, listener: Listener) {
        self.subscribe_once(event, listener);
    }

    /// Alias of [`publish`](Self::publish).
    #[inline]
    pub fn emit(&self, event: &str, args: Args) -> Result<Delivery, EmitterError> {
        self.publish(event, args)
    }

    /// Alias of [`unsubscribe`](Self::unsubscribe).
    #[inline]
    pub fn remove_listener(&self, event: &str, listener: &Listener) -> bool {
        self.unsubscribe(event, listener)
    }

    /// Alias of [`unsubscribe_all`](Self::unsubscribe_all).
    #[inline]
    pub fn remove_all_listeners(&self, event: Option<&str>) {
        self.unsubscribe_all(event);
    }

    /// Runs the bookkeeping half of a reserved-event publish under the caller's lock.
    fn take_reserved(&self, reg: &mut Registry, reserved: &str) -> Pending {
        if !reg.contains(reserved) {
            return None;
        }
        match self.inner.dispatcher.runtime() {
            Ok(rt) => Some((rt, reg.take_for_publish(reserved))),
            Err(e) => {
                tracing::warn!(event = reserved, error = %e, "reserved event not delivered");
                None
            }
        }
    }

    fn notify(&self, reserved: &str, pending: Pending, name: &str, listener: Listener) {
        if let Some((rt, listeners)) = pending {
            let _ = self.inner.dispatcher.dispatch(
                &rt,
                reserved.to_string(),
                listeners,
                args![name.to_string(), listener],
            );
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (events, max_listeners) = {
            let reg = self.inner.registry.lock();
            (reg.names(), reg.max_listeners())
        };
        f.debug_struct("Emitter")
            .field("events", &events)
            .field("max_listeners", &max_listeners)
            .field("diagnostics", &self.inner.dispatcher.diagnostics().name())
            .finish()
    }
}

/// Number of listeners for `event` on `bus`.
///
/// Returns 0 if `bus` is not an [`Emitter`] or nothing is registered for `event`.
///
/// # Example
/// ```
/// use eventvisor::{listener_count, Emitter, Listener};
///
/// let bus = Emitter::new();
/// bus.subscribe("x", Listener::from_fn(|_| {}));
/// assert_eq!(listener_count(&bus, "x"), 1);
/// assert_eq!(listener_count(&"not a bus", "x"), 0);
/// ```
pub fn listener_count(bus: &dyn Any, event: &str) -> usize {
    bus.downcast_ref::<Emitter>()
        .map_or(0, |emitter| emitter.listener_count(event))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::core::EmitterConfig;
    use crate::diagnostics::{Diagnostics, LeakWarning};

    #[derive(Default)]
    struct Probe {
        leaks: Mutex<Vec<LeakWarning>>,
        panics: AtomicUsize,
    }

    impl Diagnostics for Probe {
        fn leak_detected(&self, warning: &LeakWarning) {
            self.leaks.lock().push(warning.clone());
        }
        fn listener_panicked(&self, _event: &str, _listener: &str, _info: &str) {
            self.panics.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn probed(max_listeners: usize) -> (Emitter, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        let bus = Emitter::builder()
            .with_config(EmitterConfig { max_listeners })
            .with_diagnostics(probe.clone())
            .build();
        (bus, probe)
    }

    fn noop() -> Listener {
        Listener::from_fn(|_| {})
    }

    /// Listener forwarding `(tag, first u32 arg)` into a channel.
    fn recorder(tag: &'static str, tx: &mpsc::UnboundedSender<(&'static str, u32)>) -> Listener {
        let tx = tx.clone();
        Listener::from_fn(move |args| {
            let _ = tx.send((tag, args.get::<u32>(0).copied().unwrap_or(0)));
        })
    }

    async fn recv<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> T {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed")
    }

    #[test]
    fn test_listeners_in_subscription_order() {
        let bus = Emitter::new();
        let ls: Vec<Listener> = (0..5).map(|_| noop()).collect();
        for l in &ls {
            bus.subscribe("x", l.clone());
        }
        assert_eq!(bus.listeners("x"), ls);
        assert!(bus.listeners("missing").is_empty());
    }

    #[test]
    fn test_event_name_is_stringified() {
        let bus = Emitter::new();
        bus.subscribe(42, noop());
        assert_eq!(bus.listener_count("42"), 1);
        assert_eq!(bus.event_names(), vec!["42".to_string()]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_tick_scenario_delivers_in_order_and_deferred() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe("tick", recorder("a", &tx));
        bus.subscribe("tick", recorder("b", &tx));

        let delivery = bus.publish("tick", args![42_u32]).expect("publish");
        assert!(rx.try_recv().is_err(), "handlers must not run inside publish");

        delivery.wait().await;
        assert_eq!(recv(&mut rx).await, ("a", 42));
        assert_eq!(recv(&mut rx).await, ("b", 42));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_once_fires_exactly_once_and_count_drops_immediately() {
        let bus = Emitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        bus.subscribe_once_fn("only", move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        bus.subscribe("only", noop());
        assert_eq!(listener_count(&bus, "only"), 2);

        let first = bus.publish("only", args!["first"]).expect("publish");
        assert_eq!(listener_count(&bus, "only"), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let second = bus.publish("only", args!["second"]).expect("publish");
        first.wait().await;
        second.wait().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_once_and_persistent_neighbors_all_visited() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe_once("x", recorder("o1", &tx));
        bus.subscribe_once("x", recorder("o2", &tx));
        bus.subscribe("x", recorder("p", &tx));
        bus.subscribe_once("x", recorder("o3", &tx));

        bus.publish("x", args![1_u32]).expect("publish").wait().await;
        for tag in ["o1", "o2", "p", "o3"] {
            assert_eq!(recv(&mut rx).await, (tag, 1));
        }
        assert_eq!(bus.listener_count("x"), 1);
    }

    #[test]
    fn test_unsubscribe_true_once_per_registration() {
        let bus = Emitter::new();
        let h = noop();
        bus.subscribe("x", h.clone());
        bus.subscribe("x", h.clone());

        assert!(bus.unsubscribe("x", &h));
        assert!(bus.unsubscribe("x", &h));
        assert!(!bus.unsubscribe("x", &h));
        assert!(!bus.unsubscribe("missing", &h));
        assert!(!bus.unsubscribe("x", &noop()));
    }

    #[test]
    fn test_unsubscribe_removes_once_subscription() {
        let bus = Emitter::new();
        let h = noop();
        bus.subscribe_once("x", h.clone());
        assert!(bus.unsubscribe("x", &h));
        assert_eq!(bus.listener_count("x"), 0);
        assert!(bus.event_names().is_empty());
    }

    #[test]
    fn test_publish_without_listeners_is_noop() {
        // No runtime here: an empty publish must still succeed.
        let (bus, probe) = probed(10);
        let delivery = bus.publish("nobody", args![1_u32]).expect("no-op");
        assert!(delivery.is_empty());
        assert!(bus.event_names().is_empty());
        assert!(probe.leaks.lock().is_empty());
    }

    #[test]
    fn test_publish_without_runtime_leaves_registry_untouched() {
        let bus = Emitter::new();
        bus.subscribe_once("x", noop());
        assert_eq!(bus.publish("x", args![]).err(), Some(EmitterError::NoRuntime));
        assert_eq!(bus.listener_count("x"), 1);
    }

    #[test]
    fn test_leak_warning_fires_once() {
        let (bus, probe) = probed(10);
        for _ in 0..10 {
            bus.subscribe("x", noop());
        }
        assert!(probe.leaks.lock().is_empty());

        bus.subscribe_once("x", noop());
        bus.subscribe("x", noop());
        bus.subscribe("x", noop());

        let leaks = probe.leaks.lock().clone();
        assert_eq!(
            leaks,
            vec![LeakWarning {
                event: "x".into(),
                count: 11,
                max: 10
            }]
        );
        assert!(bus.is_warned("x"));
        assert!(!bus.is_warned("y"));
    }

    #[test]
    fn test_unlimited_listeners_never_warn() {
        let (bus, probe) = probed(10);
        bus.set_max_listeners(0).expect("valid");
        for _ in 0..50 {
            bus.subscribe("x", noop());
        }
        assert!(probe.leaks.lock().is_empty());
        assert_eq!(listener_count(&bus, "x"), 50);
    }

    #[test]
    fn test_warning_resets_after_bucket_cleared() {
        let (bus, probe) = probed(1);
        bus.subscribe("x", noop());
        bus.subscribe("x", noop());
        bus.unsubscribe_all(Some("x"));
        bus.subscribe("x", noop());
        bus.subscribe("x", noop());
        assert_eq!(probe.leaks.lock().len(), 2);
    }

    #[test]
    fn test_set_max_listeners_not_retroactive() {
        let (bus, probe) = probed(10);
        for _ in 0..5 {
            bus.subscribe("x", noop());
        }
        bus.set_max_listeners(2_u8).expect("valid");
        assert!(probe.leaks.lock().is_empty());
        bus.subscribe("x", noop());
        assert_eq!(probe.leaks.lock().len(), 1);
        assert_eq!(bus.max_listeners(), 2);
    }

    #[test]
    fn test_set_max_listeners_rejects_negative() {
        let bus = Emitter::new();
        let err = bus.set_max_listeners(-3_i64).unwrap_err();
        assert_eq!(err.as_label(), "emitter_invalid_argument");
        assert_eq!(bus.max_listeners(), 10);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_new_listener_notified_before_add_and_not_of_itself() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel::<(String, Listener, usize)>();
        let spy = {
            let bus = bus.clone();
            Listener::from_fn(move |args| {
                let name = args.get::<String>(0).cloned().unwrap_or_default();
                let count = bus.listener_count(&name);
                if let Some(l) = args.get::<Listener>(1) {
                    let _ = tx.send((name, l.clone(), count));
                }
            })
        };
        bus.subscribe(NEW_LISTENER, spy);
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err(), "spy must not see its own registration");

        let h = noop();
        bus.subscribe("x", h.clone());
        let (name, seen, _) = recv(&mut rx).await;
        assert_eq!(name, "x");
        assert_eq!(seen, h);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_remove_listener_notified_only_for_individual_removal() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel::<(String, Listener)>();
        bus.subscribe_fn(REMOVE_LISTENER, move |args| {
            if let (Some(name), Some(l)) = (args.get::<String>(0), args.get::<Listener>(1)) {
                let _ = tx.send((name.clone(), l.clone()));
            }
        });

        let h = noop();
        bus.subscribe("x", h.clone());
        assert!(bus.unsubscribe("x", &h));
        assert_eq!(recv(&mut rx).await, ("x".to_string(), h));

        bus.subscribe("y", noop());
        bus.unsubscribe_all(Some("y"));
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_new_listener_notified_for_subscribe_once() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel::<(String, Listener)>();
        bus.subscribe_fn(NEW_LISTENER, move |args| {
            if let (Some(name), Some(l)) = (args.get::<String>(0), args.get::<Listener>(1)) {
                let _ = tx.send((name.clone(), l.clone()));
            }
        });

        let h = noop();
        bus.subscribe_once("z", h.clone());
        assert_eq!(recv(&mut rx).await, ("z".to_string(), h));
        assert_eq!(bus.listener_count("z"), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_remove_listener_notified_of_its_own_removal() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let watcher = bus.subscribe_fn(REMOVE_LISTENER, move |args| {
            if let Some(name) = args.get::<String>(0) {
                let _ = tx.send(name.clone());
            }
        });

        assert!(bus.unsubscribe(REMOVE_LISTENER, &watcher));
        assert_eq!(recv(&mut rx).await, REMOVE_LISTENER.to_string());
        assert_eq!(bus.listener_count(REMOVE_LISTENER), 0);
    }

    #[test]
    fn test_debug_does_not_hold_lock_while_reading_sink_name() {
        struct Nosy(std::sync::OnceLock<Emitter>);

        impl Diagnostics for Nosy {
            fn leak_detected(&self, _: &LeakWarning) {}
            fn listener_panicked(&self, _: &str, _: &str, _: &str) {}
            fn name(&self) -> &'static str {
                match self.0.get() {
                    Some(bus) if bus.listener_count("x") > 0 => "nosy-busy",
                    _ => "nosy",
                }
            }
        }

        let sink = Arc::new(Nosy(std::sync::OnceLock::new()));
        let bus = Emitter::builder().with_diagnostics(sink.clone()).build();
        let _ = sink.0.set(bus.clone());
        bus.subscribe("x", noop());

        let out = format!("{bus:?}");
        assert!(out.contains("nosy-busy"), "{out}");
        assert!(out.contains("max_listeners: 10"), "{out}");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unsubscribe_all_silences_event() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe("tick", recorder("a", &tx));
        bus.subscribe("tick", recorder("b", &tx));
        bus.subscribe("other", recorder("c", &tx));

        bus.unsubscribe_all(Some("tick"));
        assert!(bus.listeners("tick").is_empty());
        assert!(bus.publish("tick", args![]).expect("no-op").is_empty());
        assert_eq!(bus.listener_count("other"), 1);

        bus.unsubscribe_all(None);
        assert!(bus.event_names().is_empty());
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_panicking_listener_is_isolated() {
        let (bus, probe) = probed(10);
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe_fn("x", |_| panic!("listener failure"));
        bus.subscribe("x", recorder("after", &tx));

        let delivery = bus.publish("x", args![7_u32]);
        assert!(delivery.is_ok());
        delivery.expect("publish").wait().await;

        assert_eq!(recv(&mut rx).await, ("after", 7));
        assert_eq!(probe.panics.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_handler_may_reenter_emitter() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let inner = bus.clone();
        let late = recorder("late", &tx);
        bus.subscribe_fn("x", move |_| {
            inner.subscribe("y", late.clone());
            let _ = inner.publish("y", args![5_u32]);
        });

        bus.publish("x", args![]).expect("publish").wait().await;
        assert_eq!(recv(&mut rx).await, ("late", 5));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_async_listener_runs_on_runtime() {
        let bus = Emitter::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe(
            "x",
            Listener::from_async(move |args: Args| {
                let tx = tx.clone();
                async move {
                    tokio::task::yield_now().await;
                    let _ = tx.send(args.len());
                }
            }),
        );
        bus.publish("x", args![1_u8, 2_u8, 3_u8])
            .expect("publish")
            .wait()
            .await;
        assert_eq!(recv(&mut rx).await, 3);
    }

    #[test]
    fn test_emitters_do_not_share_state() {
        let a = Emitter::new();
        let b = Emitter::new();
        a.subscribe("x", noop());
        assert_eq!(a.listener_count("x"), 1);
        assert_eq!(b.listener_count("x"), 0);

        let a2 = a.clone();
        a2.subscribe("x", noop());
        assert_eq!(a.listener_count("x"), 2);
    }

    #[test]
    fn test_listener_count_of_non_emitter_is_zero() {
        let not_a_bus = 17_u64;
        assert_eq!(listener_count(&not_a_bus, "x"), 0);
        assert_eq!(listener_count(&Emitter::new(), "x"), 0);
    }

    #[test]
    fn test_aliases_delegate() {
        let bus = Emitter::new();
        let h = noop();
        bus.on("x", h.clone());
        bus.once("x", noop());
        assert_eq!(bus.listener_count("x"), 2);
        assert!(bus.remove_listener("x", &h));
        bus.remove_all_listeners(None);
        assert_eq!(bus.listener_count("x"), 0);
        assert!(bus.emit("x", args![]).expect("no-op").is_empty());
    }
}
