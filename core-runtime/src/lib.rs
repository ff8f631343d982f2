//! # Core Runtime
//!
//! Ambient infrastructure shared by the Fieldwork core crates:
//!
//! - **Logging** ([`logging`]): `tracing-subscriber` bootstrap with
//!   env-filter support and pretty/compact/JSON output formats
//! - **Events** ([`events`]): broadcast [`EventBus`](events::EventBus) with
//!   typed sync events, used to push core state changes to host UIs

pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, SyncEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};
