/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Profile credentials bound to a single file
//!
//! The file is parsed in config format (`[default]`, `[profile name]`) by
//! [`aws_config::profile::ProfileFileCredentialsProvider`]. Whenever the file's modification
//! time changes the inner provider is rebuilt, so edits are picked up without restarting.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use aws_config::profile::ProfileFileCredentialsProvider;
#[allow(deprecated)]
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::provider_config::ProviderConfig;
use aws_credential_types::provider::{self, future, ProvideCredentials, SharedCredentialsProvider};

#[derive(Debug)]
struct Loaded {
    modified: SystemTime,
    provider: SharedCredentialsProvider,
}

/// Profile file credentials provider that reloads its file when it changes
///
/// ```rust
/// use aws_credentials_config::provider::ReloadingProfileFileProvider;
/// let provider = ReloadingProfileFileProvider::builder()
///     .profile_file("/etc/pipeline/aws.conf")
///     .profile_name("analytics")
///     .build();
/// ```
#[derive(Debug)]
pub struct ReloadingProfileFileProvider {
    profile_file: PathBuf,
    profile_name: String,
    provider_config: ProviderConfig,
    loaded: Mutex<Option<Loaded>>,
}

impl ReloadingProfileFileProvider {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn profile_file(&self) -> &Path {
        &self.profile_file
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    fn load(&self) -> ProfileFileCredentialsProvider {
        #[allow(deprecated)]
        let profile_files = ProfileFiles::builder()
            .with_file(ProfileFileKind::Config, &self.profile_file)
            .build();
        ProfileFileCredentialsProvider::builder()
            .configure(&self.provider_config)
            .profile_files(profile_files)
            .profile_name(&self.profile_name)
            .build()
    }

    /// The provider for the file as of `modified`, rebuilding it if the file changed
    fn current(&self, modified: Option<SystemTime>) -> SharedCredentialsProvider {
        let mut loaded = match self.loaded.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let (Some(current), Some(modified)) = (&*loaded, modified) {
            if current.modified == modified {
                return current.provider.clone();
            }
        }
        if modified.is_some() {
            tracing::info!(path = ?self.profile_file, "profile file (re)loaded");
        }
        let provider = SharedCredentialsProvider::new(self.load());
        *loaded = modified.map(|modified| Loaded {
            modified,
            provider: provider.clone(),
        });
        provider
    }

    async fn credentials(&self) -> provider::Result {
        let modified = match tokio::fs::metadata(&self.profile_file).await {
            Ok(metadata) => metadata.modified().ok(),
            Err(err) => {
                tracing::debug!(
                    path = ?self.profile_file,
                    error = %err,
                    "could not stat profile file"
                );
                None
            }
        };
        self.current(modified).provide_credentials().await
    }
}

impl ProvideCredentials for ReloadingProfileFileProvider {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::new(self.credentials())
    }
}

/// Builder for [`ReloadingProfileFileProvider`]
#[derive(Debug, Default)]
pub struct Builder {
    profile_file: Option<PathBuf>,
    profile_name: Option<String>,
    provider_config: Option<ProviderConfig>,
}

impl Builder {
    /// File to read profiles from
    pub fn profile_file(mut self, profile_file: impl Into<PathBuf>) -> Self {
        self.profile_file = Some(profile_file.into());
        self
    }

    /// Profile to read; defaults to `default`
    pub fn profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    /// Override the configuration (environment, file system, HTTP client) of the inner provider
    pub fn configure(mut self, provider_config: &ProviderConfig) -> Self {
        self.provider_config = Some(provider_config.clone());
        self
    }

    pub fn build(self) -> ReloadingProfileFileProvider {
        ReloadingProfileFileProvider {
            profile_file: self.profile_file.unwrap_or_default(),
            profile_name: self
                .profile_name
                .unwrap_or_else(|| crate::source::DEFAULT_PROFILE.to_owned()),
            provider_config: self
                .provider_config
                .unwrap_or_else(ProviderConfig::without_region),
            loaded: Mutex::new(None),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ReloadingProfileFileProvider;
    use aws_config::provider_config::ProviderConfig;
    use aws_credential_types::provider::ProvideCredentials;
    use aws_types::os_shim_internal::{Env, Fs};
    use std::time::{Duration, SystemTime};
    use tracing_test::traced_test;

    const CONFIG: &str = "[default]\naws_access_key_id = config-key\naws_secret_access_key = config-secret\n\n[profile analytics]\naws_access_key_id = analytics-key\naws_secret_access_key = analytics-secret\naws_session_token = analytics-token\n";

    fn provider_config(fs: Fs) -> ProviderConfig {
        ProviderConfig::without_region()
            .with_env(Env::from_slice(&[("HOME", "/home/me")]))
            .with_fs(fs)
    }

    #[tokio::test]
    async fn bound_file_is_a_config_file() {
        let provider = ReloadingProfileFileProvider::builder()
            .profile_file("/etc/pipeline/aws.conf")
            .profile_name("analytics")
            .configure(&provider_config(Fs::from_slice(&[
                ("/etc/pipeline/aws.conf", CONFIG),
                (
                    "/home/me/.aws/credentials",
                    "[analytics]\naws_access_key_id = ignored\naws_secret_access_key = ignored\n",
                ),
            ])))
            .build();
        let creds = provider.provide_credentials().await.expect("valid");
        assert_eq!(creds.access_key_id(), "analytics-key");
        assert_eq!(creds.secret_access_key(), "analytics-secret");
        assert_eq!(creds.session_token(), Some("analytics-token"));
    }

    #[tokio::test]
    async fn profile_name_defaults_to_default() {
        let provider = ReloadingProfileFileProvider::builder()
            .profile_file("/etc/pipeline/aws.conf")
            .configure(&provider_config(Fs::from_slice(&[(
                "/etc/pipeline/aws.conf",
                CONFIG,
            )])))
            .build();
        assert_eq!(provider.profile_name(), "default");
        let creds = provider.provide_credentials().await.expect("valid");
        assert_eq!(creds.access_key_id(), "config-key");
    }

    #[tokio::test]
    async fn missing_profile_fails() {
        let provider = ReloadingProfileFileProvider::builder()
            .profile_file("/etc/pipeline/aws.conf")
            .profile_name("nope")
            .configure(&provider_config(Fs::from_slice(&[(
                "/etc/pipeline/aws.conf",
                CONFIG,
            )])))
            .build();
        provider
            .provide_credentials()
            .await
            .expect_err("profile is not defined");
    }

    #[tokio::test]
    async fn bound_file_is_reloaded_when_modified() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("aws.conf");
        std::fs::write(
            &path,
            "[default]\naws_access_key_id = first\naws_secret_access_key = secret\n",
        )
        .expect("write");
        let provider = ReloadingProfileFileProvider::builder()
            .profile_file(&path)
            .configure(&ProviderConfig::without_region())
            .build();
        let creds = provider.provide_credentials().await.expect("valid");
        assert_eq!(creds.access_key_id(), "first");

        std::fs::write(
            &path,
            "[default]\naws_access_key_id = second\naws_secret_access_key = secret\n",
        )
        .expect("write");
        // make sure the change is visible even on file systems with coarse timestamps
        let later = SystemTime::now() + Duration::from_secs(10);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .and_then(|file| file.set_modified(later))
            .expect("set mtime");

        let creds = provider.provide_credentials().await.expect("valid");
        assert_eq!(creds.access_key_id(), "second");
    }

    #[traced_test]
    #[tokio::test]
    async fn unchanged_file_is_not_reloaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("aws.conf");
        std::fs::write(
            &path,
            "[default]\naws_access_key_id = first\naws_secret_access_key = secret\n",
        )
        .expect("write");
        let provider = ReloadingProfileFileProvider::builder()
            .profile_file(&path)
            .configure(&ProviderConfig::without_region())
            .build();
        provider.provide_credentials().await.expect("valid");
        provider.provide_credentials().await.expect("valid");
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("profile file (re)loaded"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one load, got {}", n)),
            }
        });
    }
}
