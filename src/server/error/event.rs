use thiserror::Error;

/// Error produced by a subscriber while handling a published event.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum EventError {
    /// A subscriber returned an error, which aborted delivery to later subscribers.
    #[error("Error while trying to invoke the event handle method in: {handler} to process event type: {event}")]
    HandlerFailed {
        /// Type name of the failing subscriber
        handler: &'static str,
        /// Type name of the event being published
        event: &'static str,
        /// The error returned by the subscriber
        #[source]
        source: HandlerError,
    },
}
