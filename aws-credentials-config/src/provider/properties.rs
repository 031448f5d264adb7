/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;
use std::sync::Arc;

use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{self, future, ProvideCredentials};
use aws_credential_types::Credentials;

const PROPERTIES_PROVIDER: &str = "SystemProperty";

mod key {
    pub(super) const ACCESS_KEY_ID: &str = "aws.accessKeyId";
    pub(super) const SECRET_ACCESS_KEY: &str = "aws.secretAccessKey";
    pub(super) const SECRET_KEY: &str = "aws.secretKey";
    pub(super) const SESSION_TOKEN: &str = "aws.sessionToken";
}

/// Host-application properties, e.g. `aws.accessKeyId=AKID`
///
/// These are supplied by the embedding application (typically from its own command line or
/// launcher configuration) rather than read from the process environment.
#[derive(Clone, Debug, Default)]
pub struct SystemProperties(Arc<HashMap<String, String>>);

impl SystemProperties {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_slice<'a>(properties: &[(&'a str, &'a str)]) -> Self {
        Self(Arc::new(
            properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for SystemProperties {
    fn from(properties: HashMap<String, String>) -> Self {
        Self(Arc::new(properties))
    }
}

/// Load credentials from `aws.accessKeyId`, `aws.secretAccessKey` and `aws.sessionToken`
#[derive(Debug)]
pub struct SystemPropertyCredentialsProvider {
    properties: SystemProperties,
}

impl SystemPropertyCredentialsProvider {
    pub fn new(properties: SystemProperties) -> Self {
        Self { properties }
    }

    fn credentials(&self) -> provider::Result {
        let property = |name: &str| {
            self.properties
                .get(name)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };
        let access_key_id = property(key::ACCESS_KEY_ID);
        let secret_access_key =
            property(key::SECRET_ACCESS_KEY).or_else(|| property(key::SECRET_KEY));
        match (access_key_id, secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Ok(Credentials::new(
                access_key_id,
                secret_access_key,
                property(key::SESSION_TOKEN).map(str::to_owned),
                None,
                PROPERTIES_PROVIDER,
            )),
            _ => Err(CredentialsError::not_loaded(
                "`aws.accessKeyId` or `aws.secretAccessKey` system property not set",
            )),
        }
    }
}

impl ProvideCredentials for SystemPropertyCredentialsProvider {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(self.credentials())
    }
}

#[cfg(test)]
mod test {
    use super::{SystemProperties, SystemPropertyCredentialsProvider};
    use aws_credential_types::provider::error::CredentialsError;
    use aws_credential_types::provider::ProvideCredentials;
    use futures_util::FutureExt;

    #[tokio::test]
    async fn loads_keys_and_token() {
        let provider = SystemPropertyCredentialsProvider::new(SystemProperties::from_slice(&[
            ("aws.accessKeyId", "AKID"),
            ("aws.secretAccessKey", "secret"),
            ("aws.sessionToken", "token"),
        ]));
        let creds = provider.provide_credentials().await.expect("valid");
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.secret_access_key(), "secret");
        assert_eq!(creds.session_token(), Some("token"));
    }

    #[tokio::test]
    async fn legacy_secret_key_name() {
        let provider = SystemPropertyCredentialsProvider::new(SystemProperties::from_slice(&[
            ("aws.accessKeyId", "AKID"),
            ("aws.secretKey", "secret"),
        ]));
        let creds = provider.provide_credentials().await.expect("valid");
        assert_eq!(creds.secret_access_key(), "secret");
        assert_eq!(creds.session_token(), None);
    }

    #[tokio::test]
    async fn missing_properties_are_not_loaded() {
        let provider = SystemPropertyCredentialsProvider::new(SystemProperties::empty());
        assert!(matches!(
            provider.provide_credentials().await,
            Err(CredentialsError::CredentialsNotLoaded(_))
        ));
    }

    #[test]
    fn credentials_are_ready_immediately() {
        let provider = SystemPropertyCredentialsProvider::new(SystemProperties::from_slice(&[
            ("aws.accessKeyId", " AKID "),
            ("aws.secretAccessKey", "secret"),
        ]));
        let creds = provider
            .provide_credentials()
            .now_or_never()
            .expect("no I/O")
            .expect("valid");
        assert_eq!(creds.access_key_id(), "AKID");
    }
}
