// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants::{self, NATIVE_TOKEN};
use crate::domain::error::AppError;
use crate::services::bytecode::BuilderConfig;
use alloy::primitives::Address;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct BuilderSettings {
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Sentinel address routes use for the chain's base currency.
    #[serde(default = "default_native_token")]
    pub native_token: Address,
    /// Overrides the per-chain wrapped native token.
    pub wrapped_native: Option<Address>,
    /// Canonical receiver for swept leftovers.
    pub receiving_address: Address,

    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
}

// Defaults
fn default_chain_id() -> u64 {
    constants::CHAIN_ETHEREUM
}
fn default_native_token() -> Address {
    NATIVE_TOKEN
}
fn default_log_level() -> String {
    "info".to_string()
}

impl BuilderSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(selected) = resolve_config_path(path) {
            builder = builder.add_source(File::from(Path::new(&selected)).required(true));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }
        // Env wins over the file: RECEIVING_ADDRESS, CHAIN_ID, WRAPPED_NATIVE, ...
        builder = builder.add_source(Environment::default());

        let settings: BuilderSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load() -> Result<Self, AppError> {
        Self::load_with_path(None)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.receiving_address == Address::ZERO {
            return Err(AppError::Config(
                "RECEIVING_ADDRESS must not be the zero address".to_string(),
            ));
        }
        if self.native_token == Address::ZERO {
            return Err(AppError::Config(
                "NATIVE_TOKEN must not be the zero address".to_string(),
            ));
        }
        Ok(())
    }

    pub fn wrapped_native_value(&self) -> Result<Address, AppError> {
        self.wrapped_native
            .or_else(|| constants::wrapped_native_for_chain(self.chain_id))
            .ok_or_else(|| {
                AppError::Config(format!(
                    "No wrapped native token known for chain {}; set WRAPPED_NATIVE",
                    self.chain_id
                ))
            })
    }

    pub fn builder_config(&self) -> Result<BuilderConfig, AppError> {
        Ok(
            BuilderConfig::new(self.wrapped_native_value()?, self.receiving_address)
                .with_native_token(self.native_token),
        )
    }
}

fn resolve_config_path(path: Option<&str>) -> Option<String> {
    if let Some(path) = path {
        return Some(path.to_string());
    }
    ["config.toml", "config.example.toml"]
        .iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(|candidate| candidate.to_string())
}
