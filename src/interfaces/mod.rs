// ============================================================================
// Interfaces Module
// Seams between the book core and its observers
// ============================================================================

mod event_handler;

pub use event_handler::{BookEvent, EventHandler, LoggingEventHandler, NoOpEventHandler};
