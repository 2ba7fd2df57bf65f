//! Typed publish/subscribe event bus.
//!
//! Moderation commands publish events once the action itself has succeeded. Subscribers
//! are registered per event type at startup and invoked sequentially in subscription
//! order. The first subscriber error stops delivery and is returned to the publisher
//! wrapped with the subscriber and event type names.

pub mod listener;
pub mod moderation;

use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use async_trait::async_trait;

use crate::server::error::event::{EventError, HandlerError};

/// Handles events of type `E`.
#[async_trait]
pub trait Subscriber<E>: Send + Sync
where
    E: Send + Sync + 'static,
{
    async fn handle(&self, event: &E) -> Result<(), HandlerError>;
}

struct Registration<E: Send + Sync + 'static> {
    name: &'static str,
    subscriber: Arc<dyn Subscriber<E>>,
}

/// Registry of subscribers keyed by event type.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscriber for events of type `E`.
    ///
    /// The same subscriber type may be registered more than once and is then invoked
    /// once per registration.
    pub fn subscribe<E, S>(&mut self, subscriber: S)
    where
        E: Send + Sync + 'static,
        S: Subscriber<E> + 'static,
    {
        let entry = self
            .subscribers
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<Registration<E>>::new()));

        if let Some(registrations) = entry.downcast_mut::<Vec<Registration<E>>>() {
            registrations.push(Registration {
                name: short_type_name::<S>(),
                subscriber: Arc::new(subscriber),
            });
        }
    }

    /// Number of subscribers registered for `E`.
    pub fn subscriber_count<E: Send + Sync + 'static>(&self) -> usize {
        self.registrations::<E>().map_or(0, Vec::len)
    }

    /// Delivers `event` to every subscriber of `E` in subscription order.
    ///
    /// Publishing an event nobody subscribed to is a no-op.
    ///
    /// # Returns
    /// - `Ok(())` - Every subscriber handled the event
    /// - `Err(EventError::HandlerFailed)` - A subscriber failed; later subscribers were not invoked
    pub async fn publish<E>(&self, event: &E) -> Result<(), EventError>
    where
        E: Send + Sync + 'static,
    {
        let Some(registrations) = self.registrations::<E>() else {
            return Ok(());
        };

        for registration in registrations {
            registration
                .subscriber
                .handle(event)
                .await
                .map_err(|source| EventError::HandlerFailed {
                    handler: registration.name,
                    event: short_type_name::<E>(),
                    source,
                })?;
        }

        Ok(())
    }

    fn registrations<E: Send + Sync + 'static>(&self) -> Option<&Vec<Registration<E>>> {
        self.subscribers
            .get(&TypeId::of::<E>())
            .and_then(|entry| entry.downcast_ref::<Vec<Registration<E>>>())
    }
}

/// Type name without its module path, e.g. `ModerationAuditListener`.
fn short_type_name<T: ?Sized>() -> &'static str {
    let name = type_name::<T>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}
