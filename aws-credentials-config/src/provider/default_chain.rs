/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::provider_config::ProviderConfig;
use aws_credential_types::provider::{self, future, ProvideCredentials};
use tokio::sync::OnceCell;

/// The SDK's default credentials chain, built on first use
///
/// Resolution order is that of [`DefaultCredentialsChain`]:
/// 1. Environment variables
/// 2. Shared config (`~/.aws/config`, `~/.aws/credentials`) using `AWS_PROFILE` or `default`
/// 3. Web identity token
/// 4. ECS container credentials
/// 5. EC2 instance metadata (IMDSv2)
///
/// Building the chain is asynchronous because it looks up the region, so it is deferred to the
/// first credentials request.
///
/// ```rust
/// let provider = aws_credentials_config::provider::DefaultChainProvider::new();
/// ```
#[derive(Debug)]
pub struct DefaultChainProvider {
    provider_config: ProviderConfig,
    chain: OnceCell<DefaultCredentialsChain>,
}

impl DefaultChainProvider {
    pub fn new() -> Self {
        Self::with_provider_config(ProviderConfig::without_region())
    }

    /// Build the chain from `provider_config` (environment, file system, HTTP client)
    pub fn with_provider_config(provider_config: ProviderConfig) -> Self {
        Self {
            provider_config,
            chain: OnceCell::new(),
        }
    }

    async fn credentials(&self) -> provider::Result {
        let chain = self
            .chain
            .get_or_init(|| {
                tracing::debug!("building default credentials chain");
                DefaultCredentialsChain::builder()
                    .configure(self.provider_config.clone())
                    .build()
            })
            .await;
        chain.provide_credentials().await
    }
}

impl Default for DefaultChainProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvideCredentials for DefaultChainProvider {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::new(self.credentials())
    }
}
