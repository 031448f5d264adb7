/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Resolved credentials sources
//!
//! A [`CredentialsSource`] records which strategy was selected and exactly the parameters that
//! strategy needs. It is turned into a concrete provider by a [`ProviderFactory`]; the crate ships
//! one in [`provider::SdkProviderFactory`](crate::provider::SdkProviderFactory), but callers
//! targeting another client stack can supply their own.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

/// Name of the profile used when none is configured
pub const DEFAULT_PROFILE: &str = "default";

/// Credentials strategy selected from configuration, with its parameters
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum CredentialsSource {
    /// An access key id and secret access key
    Static(AccessKeys),
    /// An access key id, secret access key and session token
    Session(AccessKeys),
    /// Standard AWS environment variables
    Environment,
    /// A named profile, optionally from a specific file
    Profile(ProfileSource),
    /// `aws.*` system properties
    SystemProperties,
    /// No credentials
    Anonymous,
    /// The default provider chain
    DefaultChain,
}

impl CredentialsSource {
    /// Short name of the strategy, for logging
    pub fn name(&self) -> &'static str {
        match self {
            CredentialsSource::Static(_) => "Static",
            CredentialsSource::Session(_) => "Session",
            CredentialsSource::Environment => "Environment",
            CredentialsSource::Profile(_) => "Profile",
            CredentialsSource::SystemProperties => "SystemProperties",
            CredentialsSource::Anonymous => "Anonymous",
            CredentialsSource::DefaultChain => "DefaultChain",
        }
    }

    /// Construct a provider for this source
    pub fn build_with<F: ProviderFactory + ?Sized>(&self, factory: &F) -> F::Provider {
        match self {
            CredentialsSource::Static(keys) => factory.static_credentials(keys),
            CredentialsSource::Session(keys) => factory.session_credentials(keys),
            CredentialsSource::Environment => factory.environment(),
            CredentialsSource::Profile(profile) => {
                factory.profile(profile.profile_name(), profile.profile_file())
            }
            CredentialsSource::SystemProperties => factory.system_properties(),
            CredentialsSource::Anonymous => factory.anonymous(),
            CredentialsSource::DefaultChain => factory.default_chain(),
        }
    }
}

/// Keys supplied directly in configuration
///
/// Secret material is zeroed on drop and never printed by `Debug`.
#[derive(Clone, Eq, PartialEq)]
pub struct AccessKeys {
    access_key_id: String,
    secret_access_key: Zeroizing<String>,
    session_token: Option<Zeroizing<String>>,
}

impl AccessKeys {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: Zeroizing::new(secret_access_key.into()),
            session_token: session_token.map(Zeroizing::new),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref().map(String::as_str)
    }
}

impl fmt::Debug for AccessKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKeys")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Parameters of a [`CredentialsSource::Profile`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileSource {
    profile_name: String,
    profile_file: Option<PathBuf>,
}

impl ProfileSource {
    pub fn new(profile_name: impl Into<String>, profile_file: Option<PathBuf>) -> Self {
        Self {
            profile_name: profile_name.into(),
            profile_file,
        }
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// The file the profile is read from; `None` means the default locations
    pub fn profile_file(&self) -> Option<&Path> {
        self.profile_file.as_deref()
    }
}

/// Builds concrete credentials providers for a client stack
///
/// Each method receives exactly the validated parameters of one strategy.
pub trait ProviderFactory {
    type Provider;

    fn static_credentials(&self, keys: &AccessKeys) -> Self::Provider;

    fn session_credentials(&self, keys: &AccessKeys) -> Self::Provider;

    fn environment(&self) -> Self::Provider;

    /// `profile_file` of `None` means the profile is looked up in the default locations
    fn profile(&self, profile_name: &str, profile_file: Option<&Path>) -> Self::Provider;

    fn system_properties(&self) -> Self::Provider;

    fn anonymous(&self) -> Self::Provider;

    fn default_chain(&self) -> Self::Provider;
}

#[cfg(test)]
mod test {
    use super::{AccessKeys, CredentialsSource, ProfileSource, ProviderFactory};
    use std::path::{Path, PathBuf};

    /// Records which factory method was called
    struct Describe;

    impl ProviderFactory for Describe {
        type Provider = String;

        fn static_credentials(&self, keys: &AccessKeys) -> String {
            format!("static:{}", keys.access_key_id())
        }

        fn session_credentials(&self, keys: &AccessKeys) -> String {
            format!("session:{}", keys.session_token().unwrap_or_default())
        }

        fn environment(&self) -> String {
            "env".into()
        }

        fn profile(&self, profile_name: &str, profile_file: Option<&Path>) -> String {
            format!("profile:{}:{:?}", profile_name, profile_file)
        }

        fn system_properties(&self) -> String {
            "properties".into()
        }

        fn anonymous(&self) -> String {
            "anonymous".into()
        }

        fn default_chain(&self) -> String {
            "default".into()
        }
    }

    #[test]
    fn dispatches_to_the_matching_factory_method() {
        let cases = [
            (
                CredentialsSource::Static(AccessKeys::new("AKID", "secret", None)),
                "static:AKID",
            ),
            (
                CredentialsSource::Session(AccessKeys::new(
                    "AKID",
                    "secret",
                    Some("token".to_owned()),
                )),
                "session:token",
            ),
            (CredentialsSource::Environment, "env"),
            (
                CredentialsSource::Profile(ProfileSource::new(
                    "dev",
                    Some(PathBuf::from("/etc/aws")),
                )),
                "profile:dev:Some(\"/etc/aws\")",
            ),
            (
                CredentialsSource::Profile(ProfileSource::new("default", None)),
                "profile:default:None",
            ),
            (CredentialsSource::SystemProperties, "properties"),
            (CredentialsSource::Anonymous, "anonymous"),
            (CredentialsSource::DefaultChain, "default"),
        ];
        for (source, expected) in cases {
            assert_eq!(source.build_with(&Describe), expected, "{}", source.name());
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let keys = AccessKeys::new("AKID", "very-secret", Some("very-token".to_owned()));
        let formatted = format!("{:?}", keys);
        assert!(formatted.contains("AKID"));
        assert!(!formatted.contains("very-secret"));
        assert!(!formatted.contains("very-token"));
    }
}
