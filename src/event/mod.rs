//! The event registry and its subscriber capability.
//!
//! An [`Event`] is owned by the publisher. It can register handlers, remove
//! them and invoke them. [`Event::as_subscriber`] gives consumers an
//! [`EventSubscriber`], which can only add and remove.
//!
//! # Locking
//!
//! Every operation on one event takes the same lock, and `invoke` holds it
//! for the whole pass over the handlers. Handlers must not call back into
//! the event that is invoking them: the lock is not reentrant and the call
//! will deadlock.

use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::key::{Key, KeyGenerator, RegistryId};

mod error;
mod handle;
mod handler;

pub use error::{InvokeError, InvokeResult};
pub use handle::Handle;
pub use handler::{HandlerError, HandlerResult};

use handler::Handler;

struct EventRegistryInner<S, A> {
    handlers: FxHashMap<Key, Handler<S, A>>,
    keys: KeyGenerator,
}

struct EventRegistry<S, A> {
    id: RegistryId,
    inner: Mutex<EventRegistryInner<S, A>>,
}

impl<S, A> EventRegistry<S, A> {

    fn new() -> Self {
        Self {
            id: RegistryId::next(),
            inner: Mutex::new(EventRegistryInner {
                handlers: FxHashMap::default(),
                keys: KeyGenerator::new(),
            }),
        }
    }

    fn register(&self, handler: Option<Handler<S, A>>) -> Handle {
        let Some(handler) = handler else {
            return Handle::none();
        };

        let key = {
            let mut inner = self.inner.lock();
            let key = inner.keys.next();
            inner.handlers.insert(key, handler);
            key
        };

        info!("Registered handler {} on event {}", key.as_u64(), self.id.as_u64());
        Handle::new(self.id, key)
    }

    fn deregister(&self, handle: &mut Handle) {
        let Some(key) = handle.key() else { return };

        if !handle.is_from(self.id) {
            info!(
                "Ignoring {:?}: it was not issued by event {}",
                handle,
                self.id.as_u64()
            );
            return;
        }

        // Dropped after the guard is released.
        let removed = self.inner.lock().handlers.remove(&key);
        handle.invalidate();

        match removed {
            Some(_) => info!(
                "Removed handler {} from event {}",
                key.as_u64(),
                self.id.as_u64()
            ),
            None => info!(
                "Handler {} was already gone from event {}",
                key.as_u64(),
                self.id.as_u64()
            ),
        }
    }

    fn invoke(&self, sender: Option<&S>, args: &A) -> InvokeResult {
        let inner = self.inner.lock();
        for handler in inner.handlers.values() {
            if let Err(e) = handler(sender, args) {
                error!("Handler failed on event {}: {}", self.id.as_u64(), e);
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn contains(&self, handle: &Handle) -> bool {
        match handle.key() {
            Some(key) if handle.is_from(self.id) => {
                self.inner.lock().handlers.contains_key(&key)
            }
            _ => false,
        }
    }

    fn len(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    fn clear(&self) {
        let handlers = std::mem::take(&mut self.inner.lock().handlers);
        info!("Cleared {} handlers from event {}", handlers.len(), self.id.as_u64());
    }
}

impl<S, A> fmt::Debug for EventRegistry<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Event");
        s.field("id", &self.id.as_u64());
        // try_lock keeps this usable from inside a handler.
        match self.inner.try_lock() {
            Some(inner) => {
                s.field("handlers", &inner.handlers.len());
            }
            None => {
                s.field("handlers", &format_args!("<locked>"));
            }
        }
        s.finish()
    }
}

/// A multicast event carrying a sender of type `S` and arguments of type `A`.
///
/// Handlers are called synchronously on the thread that calls
/// [`invoke`](Event::invoke), in no particular order.
pub struct Event<S, A> {
    registry: Arc<EventRegistry<S, A>>,
}

impl<S, A> Event<S, A>
where
    S: 'static,
    A: 'static
{
    pub fn new() -> Self {
        Self {
            registry: Arc::new(EventRegistry::new()),
        }
    }

    /// Returns a capability that can add and remove handlers but cannot
    /// invoke the event.
    pub fn as_subscriber(&self) -> EventSubscriber<S, A> {
        EventSubscriber {
            registry: Arc::clone(&self.registry),
        }
    }

    pub fn add<F>(&self, handler: F) -> Handle
    where
        F: Fn(Option<&S>, &A) + Send + Sync + 'static
    {
        self.registry.register(Some(handler::infallible(handler)))
    }

    /// Registers `handler` if there is one. `None` registers nothing and
    /// returns [`Handle::none`].
    pub fn add_optional<F>(&self, handler: Option<F>) -> Handle
    where
        F: Fn(Option<&S>, &A) + Send + Sync + 'static
    {
        self.registry.register(handler.map(handler::infallible))
    }

    /// Registers a handler that can fail. A failure stops the invoke pass
    /// it happens in and is returned from [`invoke`](Event::invoke).
    pub fn try_add<F>(&self, handler: F) -> Handle
    where
        F: Fn(Option<&S>, &A) -> HandlerResult + Send + Sync + 'static
    {
        self.registry.register(Some(handler::fallible(handler)))
    }

    pub fn try_add_optional<F>(&self, handler: Option<F>) -> Handle
    where
        F: Fn(Option<&S>, &A) -> HandlerResult + Send + Sync + 'static
    {
        self.registry.register(handler.map(handler::fallible))
    }

    /// Removes the handler behind `handle` and clears the handle.
    ///
    /// Sentinel, spent and foreign handles are ignored.
    pub fn remove(&self, handle: &mut Handle) {
        self.registry.deregister(handle)
    }

    /// Calls every registered handler with `sender` and `args`.
    ///
    /// Stops at the first handler that returns an error and returns it.
    /// Handlers not yet reached in that pass are not called. A panicking
    /// handler unwinds through this call; the event stays usable.
    pub fn invoke(&self, sender: Option<&S>, args: &A) -> InvokeResult {
        self.registry.invoke(sender, args)
    }

    pub fn contains(&self, handle: &Handle) -> bool {
        self.registry.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every handler. Outstanding handles become no-ops.
    pub fn clear(&self) {
        self.registry.clear()
    }
}

impl<S, A> Default for Event<S, A>
where
    S: 'static,
    A: 'static
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> fmt::Debug for Event<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.registry, f)
    }
}

/// Subscribe-only view of an [`Event`].
pub struct EventSubscriber<S, A> {
    registry: Arc<EventRegistry<S, A>>,
}

impl<S, A> EventSubscriber<S, A>
where
    S: 'static,
    A: 'static
{
    pub fn add<F>(&self, handler: F) -> Handle
    where
        F: Fn(Option<&S>, &A) + Send + Sync + 'static
    {
        self.registry.register(Some(handler::infallible(handler)))
    }

    pub fn add_optional<F>(&self, handler: Option<F>) -> Handle
    where
        F: Fn(Option<&S>, &A) + Send + Sync + 'static
    {
        self.registry.register(handler.map(handler::infallible))
    }

    pub fn try_add<F>(&self, handler: F) -> Handle
    where
        F: Fn(Option<&S>, &A) -> HandlerResult + Send + Sync + 'static
    {
        self.registry.register(Some(handler::fallible(handler)))
    }

    pub fn try_add_optional<F>(&self, handler: Option<F>) -> Handle
    where
        F: Fn(Option<&S>, &A) -> HandlerResult + Send + Sync + 'static
    {
        self.registry.register(handler.map(handler::fallible))
    }

    pub fn remove(&self, handle: &mut Handle) {
        self.registry.deregister(handle)
    }

    pub fn contains(&self, handle: &Handle) -> bool {
        self.registry.contains(handle)
    }
}

impl<S, A> Clone for EventSubscriber<S, A> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S, A> fmt::Debug for EventSubscriber<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.registry, f)
    }
}
