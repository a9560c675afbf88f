//! Configuration for the resolver engine: explicit typed settings with
//! documented defaults, a TOML loader, and construction-time validation.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, ResolverConfig, ResolverSettings};
