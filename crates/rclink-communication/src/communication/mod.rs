//! Connection lifecycle shared by the command and telemetry paths
//!
//! Every operation opens its own [`Session`]; nothing is pooled or reused.

pub mod session;

pub use session::Session;
