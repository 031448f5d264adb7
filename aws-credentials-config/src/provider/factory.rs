/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;

use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::provider_config::ProviderConfig;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_types::os_shim_internal::{Env, Fs};

use crate::provider::default_chain::DefaultChainProvider;
use crate::provider::profile::ReloadingProfileFileProvider;
use crate::provider::properties::{SystemProperties, SystemPropertyCredentialsProvider};
use crate::source::{AccessKeys, ProviderFactory};

const STATIC_CREDENTIALS: &str = "Static";
const SESSION_CREDENTIALS: &str = "Session";

/// [`ProviderFactory`] building providers from `aws-config`
///
/// The built provider is meant for an SDK client's `credentials_provider` setting; `None` selects
/// anonymous access, where requests are not signed.
///
/// Ambient state (process environment, file system, system properties) is captured at
/// construction so it can be replaced:
/// ```rust
/// use aws_credentials_config::provider::{SdkProviderFactory, SystemProperties};
/// let factory = SdkProviderFactory::new().with_system_properties(SystemProperties::from_slice(&[
///     ("aws.accessKeyId", "AKIDEXAMPLE"),
///     ("aws.secretAccessKey", "secret"),
/// ]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SdkProviderFactory {
    env: Env,
    fs: Fs,
    properties: SystemProperties,
}

impl SdkProviderFactory {
    /// Factory reading the real environment and file system, with no system properties
    pub fn new() -> Self {
        Self::default()
    }

    #[doc(hidden)]
    /// Override the environment used by the built providers
    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    #[doc(hidden)]
    /// Override the file system used by the built providers
    pub fn with_fs(mut self, fs: Fs) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_system_properties(mut self, properties: SystemProperties) -> Self {
        self.properties = properties;
        self
    }

    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::without_region()
            .with_env(self.env.clone())
            .with_fs(self.fs.clone())
    }
}

fn credentials(keys: &AccessKeys, provider_name: &'static str) -> SharedCredentialsProvider {
    SharedCredentialsProvider::new(Credentials::new(
        keys.access_key_id(),
        keys.secret_access_key(),
        keys.session_token().map(str::to_owned),
        None,
        provider_name,
    ))
}

impl ProviderFactory for SdkProviderFactory {
    type Provider = Option<SharedCredentialsProvider>;

    fn static_credentials(&self, keys: &AccessKeys) -> Self::Provider {
        Some(credentials(keys, STATIC_CREDENTIALS))
    }

    fn session_credentials(&self, keys: &AccessKeys) -> Self::Provider {
        Some(credentials(keys, SESSION_CREDENTIALS))
    }

    fn environment(&self) -> Self::Provider {
        Some(SharedCredentialsProvider::new(
            EnvironmentVariableCredentialsProvider::new_with_env(self.env.clone()),
        ))
    }

    fn profile(&self, profile_name: &str, profile_file: Option<&Path>) -> Self::Provider {
        let provider_config = self.provider_config();
        let provider = match profile_file {
            Some(profile_file) => SharedCredentialsProvider::new(
                ReloadingProfileFileProvider::builder()
                    .profile_file(profile_file)
                    .profile_name(profile_name)
                    .configure(&provider_config)
                    .build(),
            ),
            None => SharedCredentialsProvider::new(
                ProfileFileCredentialsProvider::builder()
                    .configure(&provider_config)
                    .profile_name(profile_name)
                    .build(),
            ),
        };
        Some(provider)
    }

    fn system_properties(&self) -> Self::Provider {
        Some(SharedCredentialsProvider::new(
            SystemPropertyCredentialsProvider::new(self.properties.clone()),
        ))
    }

    fn anonymous(&self) -> Self::Provider {
        None
    }

    fn default_chain(&self) -> Self::Provider {
        Some(SharedCredentialsProvider::new(
            DefaultChainProvider::with_provider_config(self.provider_config()),
        ))
    }
}
