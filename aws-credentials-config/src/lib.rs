/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! AWS credentials from task configuration
//!
//! A task declares how it authenticates with a single `auth_method` option plus a handful of
//! optional fields. This crate validates that combination and turns it into one
//! [`CredentialsSource`], which in turn builds a credentials provider.
//!
//! ```rust
//! use aws_credentials_config::CredentialsConfig;
//! use aws_credentials_config::provider::SystemProperties;
//!
//! let config = CredentialsConfig::builder()
//!     .auth_method("profile")
//!     .profile_name("analytics")
//!     .build();
//! let provider = aws_credentials_config::credentials_provider(&config, &SystemProperties::empty())
//!     .expect("valid config");
//! assert!(provider.is_some());
//! ```
//!
//! The provider is handed to an SDK client through its `credentials_provider` setting; `None`
//! means the client should not sign requests.
//!
//! Invalid combinations are rejected up front:
//! ```rust
//! use aws_credentials_config::{ConfigurationError, CredentialsConfig};
//! use aws_credentials_config::provider::SystemProperties;
//!
//! let config = CredentialsConfig::builder()
//!     .auth_method("env")
//!     .access_key_id("AKIDEXAMPLE")
//!     .build();
//! let err = aws_credentials_config::credentials_provider(&config, &SystemProperties::empty())
//!     .unwrap_err();
//! assert!(matches!(err, ConfigurationError::ConflictingField { .. }));
//! ```

#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod auth_method;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod resolve;
pub mod source;

pub use auth_method::AuthMethod;
pub use config::{CredentialsConfig, PrefixedCredentialsConfig};
pub use diagnostics::{DeprecationNotice, Diagnostics, TracingDiagnostics};
pub use error::ConfigurationError;
pub use resolve::{resolve, CredentialsResolver};
pub use source::{AccessKeys, CredentialsSource, ProfileSource, ProviderFactory, DEFAULT_PROFILE};

use aws_credential_types::provider::SharedCredentialsProvider;
use provider::{SdkProviderFactory, SystemProperties};

/// Resolve `config` and build the provider it selects
///
/// The provider reads the real environment and file system. `properties` backs the `properties`
/// method; pass [`SystemProperties::empty`] when the task has none. `Ok(None)` means anonymous
/// access.
pub fn credentials_provider(
    config: &CredentialsConfig,
    properties: &SystemProperties,
) -> Result<Option<SharedCredentialsProvider>, ConfigurationError> {
    let source = resolve(config)?;
    tracing::debug!(source = source.name(), "resolved credentials source");
    let factory = SdkProviderFactory::new().with_system_properties(properties.clone());
    Ok(source.build_with(&factory))
}

/// [`credentials_provider`] for configurations using `aws_` prefixed option names
pub fn credentials_provider_with_prefix(
    config: &PrefixedCredentialsConfig,
    properties: &SystemProperties,
) -> Result<Option<SharedCredentialsProvider>, ConfigurationError> {
    credentials_provider(&config.clone().into(), properties)
}
