//! Domain layer: pure business logic, no I/O.

pub mod context;
pub mod conversation;
pub mod foundation;
pub mod intent;
pub mod language;
pub mod routing;
pub mod templates;
