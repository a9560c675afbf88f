//! Configuration loading from files and environment.

use crate::types::ResolverConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ResolverConfig> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {:?}", path))?;

		let config = Self::from_toml(&contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Parses configuration from a TOML string without validating.
	pub fn from_toml(contents: &str) -> Result<ResolverConfig> {
		toml::from_str(contents).context("Failed to parse TOML")
	}

	/// Loads from a file, applies environment overrides, and validates.
	pub fn from_env_and_file<P: AsRef<Path>>(path: P) -> Result<ResolverConfig> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {:?}", path))?;
		let mut config = Self::from_toml(&contents)?;

		Self::apply_env_overrides(&mut config);

		config.validate()?;
		Ok(config)
	}

	/// Applies environment variable overrides.
	fn apply_env_overrides(config: &mut ResolverConfig) {
		if let Ok(address) = std::env::var("RESOLVER_ADDRESS") {
			debug!("Overriding resolver address from environment");
			config.resolver.address = address;
		}
		if let Ok(urgency) = std::env::var("RESOLVER_GAS_URGENCY") {
			match urgency.to_lowercase().as_str() {
				"low" => config.engine.gas_urgency = resolver_types::GasUrgency::Low,
				"medium" => config.engine.gas_urgency = resolver_types::GasUrgency::Medium,
				"high" => config.engine.gas_urgency = resolver_types::GasUrgency::High,
				other => debug!("Ignoring unknown RESOLVER_GAS_URGENCY: {}", other),
			}
		}
	}
}
