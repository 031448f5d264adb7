/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Configuration to credentials source resolution
//!
//! Each `auth_method` permits some fields, requires some and forbids the rest:
//!
//! | method       | required                              | forbidden                         |
//! |--------------|---------------------------------------|-----------------------------------|
//! | `basic`      | both keys (see below)                 | `session_token`, profile fields   |
//! | `env`        |                                       | all                               |
//! | `instance`   | unsupported                           |                                   |
//! | `profile`    |                                       | both keys, `session_token`        |
//! | `properties` |                                       | all                               |
//! | `anonymous`  |                                       | all                               |
//! | `session`    | both keys, `session_token`            | profile fields                    |
//! | `default`    |                                       | all                               |
//!
//! "Both keys" are `access_key_id` and `secret_access_key`; the profile fields are `profile_file`
//! and `profile_name`.
//!
//! **Deprecated:** `basic` with neither `access_key_id` nor `secret_access_key` resolves to
//! anonymous access and reports a [`DeprecationNotice`]. Set `auth_method: anonymous` instead;
//! the fallback can be disabled with [`Builder::anonymous_fallback`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth_method::{AuthMethod, UnknownAuthMethod};
use crate::config::{CredentialsConfig, OptionNames};
use crate::diagnostics::{DeprecationNotice, Diagnostics, TracingDiagnostics};
use crate::error::ConfigurationError;
use crate::source::{AccessKeys, CredentialsSource, ProfileSource, DEFAULT_PROFILE};

/// Return the value of a required field
///
/// `fields` names the missing field first, followed by any fields that must accompany it.
pub fn require<T>(value: Option<T>, fields: &[String]) -> Result<T, ConfigurationError> {
    value.ok_or_else(|| ConfigurationError::MissingRequiredField {
        fields: fields.to_vec(),
    })
}

/// Fail if a forbidden field is set
pub fn reject<T>(value: Option<T>, field: String) -> Result<(), ConfigurationError> {
    match value {
        Some(_) => Err(ConfigurationError::ConflictingField { field }),
        None => Ok(()),
    }
}

/// Resolves [`CredentialsConfig`] into a [`CredentialsSource`]
///
/// Resolution is a pure function of the configuration except for diagnostics, which go to the
/// configured [`Diagnostics`] sink.
///
/// ```rust
/// use aws_credentials_config::{CredentialsConfig, CredentialsResolver, CredentialsSource};
/// let config = CredentialsConfig::builder().auth_method("env").build();
/// let source = CredentialsResolver::new().resolve(&config).unwrap();
/// assert_eq!(source, CredentialsSource::Environment);
/// ```
#[derive(Clone, Debug)]
pub struct CredentialsResolver {
    diagnostics: Arc<dyn Diagnostics>,
    anonymous_fallback: bool,
}

impl Default for CredentialsResolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CredentialsResolver {
    /// Resolver logging through `tracing` with the `basic` anonymous fallback enabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn resolve(
        &self,
        config: &CredentialsConfig,
    ) -> Result<CredentialsSource, ConfigurationError> {
        let names = config.option_names();
        let method = config
            .auth_method()
            .parse::<AuthMethod>()
            .map_err(|UnknownAuthMethod(method)| ConfigurationError::UnknownMethod {
                option: names.auth_method(),
                method,
            })?;
        match method {
            AuthMethod::Basic => self.basic(config, &names),
            AuthMethod::Env => {
                reject_keys(config, &names)?;
                reject_profile(config, &names)?;
                Ok(CredentialsSource::Environment)
            }
            AuthMethod::Instance => Err(ConfigurationError::UnsupportedMethod {
                option: names.auth_method(),
                method: method.to_string(),
                reason: "instance profile credentials are deprecated, use 'default' or 'env'"
                    .into(),
            }),
            AuthMethod::Profile => {
                reject_keys(config, &names)?;
                let profile_file = match config.profile_file() {
                    Some("") => {
                        return Err(ConfigurationError::InvalidValue {
                            field: names.profile_file(),
                            reason: "path must not be empty".into(),
                        })
                    }
                    Some(path) => Some(PathBuf::from(path)),
                    None => None,
                };
                let profile_name = config.profile_name().unwrap_or(DEFAULT_PROFILE);
                Ok(CredentialsSource::Profile(ProfileSource::new(
                    profile_name,
                    profile_file,
                )))
            }
            AuthMethod::Properties => {
                reject_keys(config, &names)?;
                reject_profile(config, &names)?;
                Ok(CredentialsSource::SystemProperties)
            }
            AuthMethod::Anonymous => {
                reject_keys(config, &names)?;
                reject_profile(config, &names)?;
                Ok(CredentialsSource::Anonymous)
            }
            AuthMethod::Session => {
                let access_key_id = require(
                    config.access_key_id(),
                    &[
                        names.access_key_id(),
                        names.secret_access_key(),
                        names.session_token(),
                    ],
                )?;
                let secret_access_key = require(
                    config.secret_access_key(),
                    &[names.secret_access_key(), names.session_token()],
                )?;
                let session_token = require(config.session_token(), &[names.session_token()])?;
                reject_profile(config, &names)?;
                Ok(CredentialsSource::Session(AccessKeys::new(
                    access_key_id,
                    secret_access_key,
                    Some(session_token.to_owned()),
                )))
            }
            AuthMethod::Default => {
                reject_keys(config, &names)?;
                reject_profile(config, &names)?;
                Ok(CredentialsSource::DefaultChain)
            }
        }
    }

    fn basic(
        &self,
        config: &CredentialsConfig,
        names: &OptionNames<'_>,
    ) -> Result<CredentialsSource, ConfigurationError> {
        reject(config.session_token(), names.session_token())?;
        reject_profile(config, names)?;
        if self.anonymous_fallback
            && config.access_key_id().is_none()
            && config.secret_access_key().is_none()
        {
            self.diagnostics.deprecated(&DeprecationNotice {
                auth_method_option: names.auth_method(),
                access_key_id_option: names.access_key_id(),
                secret_access_key_option: names.secret_access_key(),
            });
            return Ok(CredentialsSource::Anonymous);
        }
        let access_key_id = require(
            config.access_key_id(),
            &[names.access_key_id(), names.secret_access_key()],
        )?;
        let secret_access_key =
            require(config.secret_access_key(), &[names.secret_access_key()])?;
        Ok(CredentialsSource::Static(AccessKeys::new(
            access_key_id,
            secret_access_key,
            None,
        )))
    }
}

fn reject_keys(
    config: &CredentialsConfig,
    names: &OptionNames<'_>,
) -> Result<(), ConfigurationError> {
    reject(config.access_key_id(), names.access_key_id())?;
    reject(config.secret_access_key(), names.secret_access_key())?;
    reject(config.session_token(), names.session_token())
}

fn reject_profile(
    config: &CredentialsConfig,
    names: &OptionNames<'_>,
) -> Result<(), ConfigurationError> {
    reject(config.profile_file(), names.profile_file())?;
    reject(config.profile_name(), names.profile_name())
}

/// Builder for [`CredentialsResolver`]
#[derive(Debug)]
pub struct Builder {
    diagnostics: Arc<dyn Diagnostics>,
    anonymous_fallback: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            diagnostics: Arc::new(TracingDiagnostics),
            anonymous_fallback: true,
        }
    }
}

impl Builder {
    /// Override where diagnostics are reported
    ///
    /// Defaults to [`TracingDiagnostics`].
    pub fn diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Arc::new(diagnostics);
        self
    }

    /// Whether `basic` without keys falls back to anonymous access (default: `true`)
    ///
    /// When disabled, such configurations fail with
    /// [`MissingRequiredField`](ConfigurationError::MissingRequiredField).
    pub fn anonymous_fallback(mut self, enabled: bool) -> Self {
        self.anonymous_fallback = enabled;
        self
    }

    pub fn build(self) -> CredentialsResolver {
        CredentialsResolver {
            diagnostics: self.diagnostics,
            anonymous_fallback: self.anonymous_fallback,
        }
    }
}

/// Resolve `config` with the default [`CredentialsResolver`]
pub fn resolve(config: &CredentialsConfig) -> Result<CredentialsSource, ConfigurationError> {
    CredentialsResolver::default().resolve(config)
}
