//! Core types and service wiring for binday, the bin collection assistant.

/// Spoken bin names mapped to canonical categories.
pub mod bin_type;
/// TOML settings.
pub mod config;
/// Address and permission checks.
pub mod guard;
/// Voice intents translated into queries.
pub mod intent;
/// Domain models shared by all components.
pub mod model;
/// Decoding of JSON and iCalendar schedules.
pub mod parser;
/// Registry for plugging council-specific providers into the service.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// Matching of queries against schedules.
pub mod resolver;
/// Spoken wording for answers and failures.
pub mod response;
/// High-level service facade used by clients.
pub mod service;
/// Weekday names and spoken-date markup.
pub mod speech;
/// Log output setup.
pub mod tracing;

pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use resolver::{ResolverOptions, TieBreak, TomorrowAbsence, resolve};
pub use service::*;
