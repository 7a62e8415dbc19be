//! HTTP server for the Pix, bill-splitting and assistant operations
//!
//! `ServerBuilder` assembles a [`ServerHost`] from configuration and
//! collaborators; [`RestExposure`] turns the host into an Axum router.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
