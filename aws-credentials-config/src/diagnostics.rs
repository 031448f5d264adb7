/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Diagnostics emitted during resolution
//!
//! Resolution is otherwise side-effect free. The only thing it reports is the deprecated
//! `basic`-without-keys fallback, and it reports it through a [`Diagnostics`] sink rather than a
//! global logger so callers (and tests) decide where the notice ends up.

use std::fmt;
use std::sync::Arc;

/// `auth_method: basic` was used without any keys and was treated as `anonymous`
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct DeprecationNotice {
    /// Qualified name of the discriminator option, e.g. `aws_auth_method`
    pub auth_method_option: String,
    /// Qualified name of the access key id option
    pub access_key_id_option: String,
    /// Qualified name of the secret access key option
    pub secret_access_key_option: String,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Both '{}' and '{}' are not set. Assuming that '{}: anonymous' option is set. \
             If you intentionally use anonymous authentication, please set '{}: anonymous' option. \
             This behavior will be removed in a future release.",
            self.access_key_id_option,
            self.secret_access_key_option,
            self.auth_method_option,
            self.auth_method_option,
        )
    }
}

/// Sink for diagnostics raised while resolving credentials configuration
pub trait Diagnostics: Send + Sync + fmt::Debug {
    /// Report use of a deprecated configuration shape
    fn deprecated(&self, notice: &DeprecationNotice);
}

impl<T: Diagnostics + ?Sized> Diagnostics for Arc<T> {
    fn deprecated(&self, notice: &DeprecationNotice) {
        self.as_ref().deprecated(notice)
    }
}

/// Logs diagnostics as `tracing` events
///
/// This is the sink used unless another one is configured.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn deprecated(&self, notice: &DeprecationNotice) {
        tracing::warn!(
            auth_method = %notice.auth_method_option,
            access_key_id = %notice.access_key_id_option,
            secret_access_key = %notice.secret_access_key_option,
            "{}",
            notice
        );
    }
}

#[cfg(test)]
mod test {
    use super::{DeprecationNotice, Diagnostics, TracingDiagnostics};
    use tracing_test::traced_test;

    fn notice() -> DeprecationNotice {
        DeprecationNotice {
            auth_method_option: "aws_auth_method".into(),
            access_key_id_option: "aws_access_key_id".into(),
            secret_access_key_option: "aws_secret_access_key".into(),
        }
    }

    #[test]
    #[traced_test]
    fn tracing_sink_logs_a_warning() {
        TracingDiagnostics.deprecated(&notice());
        assert!(logs_contain("WARN"));
        assert!(logs_contain(
            "Both 'aws_access_key_id' and 'aws_secret_access_key' are not set"
        ));
        assert!(logs_contain("please set 'aws_auth_method: anonymous' option"));
    }
}
