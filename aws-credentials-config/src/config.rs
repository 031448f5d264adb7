/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Credentials task configuration
//!
//! [`CredentialsConfig`] is the bag of options a task declares to pick and parameterize a
//! credentials provider. It is normally deserialized as part of a larger task configuration:
//! ```rust
//! use aws_credentials_config::CredentialsConfig;
//! #[derive(serde::Deserialize)]
//! struct Task {
//!     bucket: String,
//!     #[serde(flatten)]
//!     credentials: CredentialsConfig,
//! }
//! ```
//!
//! Tasks that namespace their options with `aws_` use [`PrefixedCredentialsConfig`] instead. The
//! prefix only changes the option names reported in errors.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;

use crate::auth_method::AuthMethod;

pub(crate) mod option {
    pub(crate) const AUTH_METHOD: &str = "auth_method";
    pub(crate) const ACCESS_KEY_ID: &str = "access_key_id";
    pub(crate) const SECRET_ACCESS_KEY: &str = "secret_access_key";
    pub(crate) const SESSION_TOKEN: &str = "session_token";
    pub(crate) const PROFILE_FILE: &str = "profile_file";
    pub(crate) const PROFILE_NAME: &str = "profile_name";
}

/// Prefix used by [`PrefixedCredentialsConfig`]
pub const AWS_PREFIX: &str = "aws_";

fn default_auth_method() -> String {
    AuthMethod::default().as_str().to_owned()
}

/// Options selecting a credentials provider
///
/// `auth_method` defaults to `basic`; every other field defaults to unset. Which of the other
/// fields may be set depends entirely on `auth_method`, see
/// [`CredentialsResolver`](crate::CredentialsResolver).
#[derive(Clone, Deserialize, Eq, PartialEq)]
pub struct CredentialsConfig {
    #[serde(default = "default_auth_method")]
    auth_method: String,
    #[serde(default)]
    access_key_id: Option<String>,
    #[serde(default)]
    secret_access_key: Option<String>,
    #[serde(default)]
    session_token: Option<String>,
    #[serde(default)]
    profile_file: Option<String>,
    #[serde(default)]
    profile_name: Option<String>,
    #[serde(skip)]
    prefix: Cow<'static, str>,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            auth_method: default_auth_method(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            profile_file: None,
            profile_name: None,
            prefix: Cow::Borrowed(""),
        }
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "** redacted **");
        f.debug_struct("CredentialsConfig")
            .field("auth_method", &self.auth_method)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redacted(&self.secret_access_key))
            .field("session_token", &redacted(&self.session_token))
            .field("profile_file", &self.profile_file)
            .field("profile_name", &self.profile_name)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl CredentialsConfig {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The raw `auth_method` value; it has not been validated
    pub fn auth_method(&self) -> &str {
        &self.auth_method
    }

    pub fn access_key_id(&self) -> Option<&str> {
        self.access_key_id.as_deref()
    }

    pub fn secret_access_key(&self) -> Option<&str> {
        self.secret_access_key.as_deref()
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn profile_file(&self) -> Option<&str> {
        self.profile_file.as_deref()
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.profile_name.as_deref()
    }

    /// Prefix applied to option names in diagnostics
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns this configuration with option names reported under `prefix`
    pub fn with_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Option names as they appear in the user's configuration
    pub fn option_names(&self) -> OptionNames<'_> {
        OptionNames {
            prefix: &self.prefix,
        }
    }
}

/// Option names qualified with a configuration prefix
///
/// ```rust
/// use aws_credentials_config::CredentialsConfig;
/// let config = CredentialsConfig::default().with_prefix("aws_");
/// assert_eq!(config.option_names().access_key_id(), "aws_access_key_id");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct OptionNames<'a> {
    prefix: &'a str,
}

impl OptionNames<'_> {
    fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    pub fn auth_method(&self) -> String {
        self.qualify(option::AUTH_METHOD)
    }

    pub fn access_key_id(&self) -> String {
        self.qualify(option::ACCESS_KEY_ID)
    }

    pub fn secret_access_key(&self) -> String {
        self.qualify(option::SECRET_ACCESS_KEY)
    }

    pub fn session_token(&self) -> String {
        self.qualify(option::SESSION_TOKEN)
    }

    pub fn profile_file(&self) -> String {
        self.qualify(option::PROFILE_FILE)
    }

    pub fn profile_name(&self) -> String {
        self.qualify(option::PROFILE_NAME)
    }
}

/// Builder for [`CredentialsConfig`]
#[derive(Debug, Default)]
pub struct Builder {
    inner: CredentialsConfig,
}

impl Builder {
    pub fn auth_method(mut self, auth_method: impl Into<String>) -> Self {
        self.inner.auth_method = auth_method.into();
        self
    }

    pub fn access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.inner.access_key_id = Some(access_key_id.into());
        self
    }

    pub fn secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.inner.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn session_token(mut self, session_token: impl Into<String>) -> Self {
        self.inner.session_token = Some(session_token.into());
        self
    }

    pub fn profile_file(mut self, profile_file: impl Into<String>) -> Self {
        self.inner.profile_file = Some(profile_file.into());
        self
    }

    pub fn profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.inner.profile_name = Some(profile_name.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.inner.prefix = prefix.into();
        self
    }

    pub fn build(self) -> CredentialsConfig {
        self.inner
    }
}

/// [`CredentialsConfig`] with every option spelled with an `aws_` prefix
///
/// ```yaml
/// aws_auth_method: profile
/// aws_profile_name: analytics
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct PrefixedCredentialsConfig {
    #[serde(rename = "aws_auth_method", default = "default_auth_method")]
    auth_method: String,
    #[serde(rename = "aws_access_key_id", default)]
    access_key_id: Option<String>,
    #[serde(rename = "aws_secret_access_key", default)]
    secret_access_key: Option<String>,
    #[serde(rename = "aws_session_token", default)]
    session_token: Option<String>,
    #[serde(rename = "aws_profile_file", default)]
    profile_file: Option<String>,
    #[serde(rename = "aws_profile_name", default)]
    profile_name: Option<String>,
}

impl From<PrefixedCredentialsConfig> for CredentialsConfig {
    fn from(value: PrefixedCredentialsConfig) -> Self {
        CredentialsConfig {
            auth_method: value.auth_method,
            access_key_id: value.access_key_id,
            secret_access_key: value.secret_access_key,
            session_token: value.session_token,
            profile_file: value.profile_file,
            profile_name: value.profile_name,
            prefix: Cow::Borrowed(AWS_PREFIX),
        }
    }
}
