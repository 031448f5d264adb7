/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The `auth_method` discriminator

use std::fmt;
use std::str::FromStr;

/// Credentials resolution strategy selected by `auth_method`
///
/// Every variant maps to exactly one spelling in configuration. Parsing is case-sensitive, as
/// task configurations have always been.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AuthMethod {
    /// Static access key id and secret access key
    ///
    /// When neither key is set, falls back to anonymous access (deprecated).
    #[default]
    Basic,
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_SESSION_TOKEN`
    Env,
    /// Host instance metadata. Recognized but not supported.
    Instance,
    /// A named profile from a profile file
    Profile,
    /// `aws.accessKeyId` / `aws.secretAccessKey` system properties
    Properties,
    /// No credentials; requests are sent unsigned
    Anonymous,
    /// Static access key id, secret access key and session token
    Session,
    /// The default provider chain
    Default,
}

impl AuthMethod {
    /// Every method, in the order they are listed in diagnostics
    pub const ALL: [AuthMethod; 8] = [
        AuthMethod::Basic,
        AuthMethod::Env,
        AuthMethod::Instance,
        AuthMethod::Profile,
        AuthMethod::Properties,
        AuthMethod::Anonymous,
        AuthMethod::Session,
        AuthMethod::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Basic => "basic",
            AuthMethod::Env => "env",
            AuthMethod::Instance => "instance",
            AuthMethod::Profile => "profile",
            AuthMethod::Properties => "properties",
            AuthMethod::Anonymous => "anonymous",
            AuthMethod::Session => "session",
            AuthMethod::Default => "default",
        }
    }

    /// Human readable list of every supported method: `basic, env, ... and default`
    pub fn supported_methods() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(AuthMethod::as_str).collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
            Some((last, _)) => last.to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `auth_method` did not name any known method
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown auth method `{0}`")]
pub struct UnknownAuthMethod(pub String);

impl FromStr for AuthMethod {
    type Err = UnknownAuthMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthMethod::ALL
            .iter()
            .find(|method| method.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownAuthMethod(s.to_owned()))
    }
}

#[cfg(test)]
mod test {
    use super::AuthMethod;

    #[test]
    fn every_method_parses_from_its_name() {
        for method in AuthMethod::ALL {
            assert_eq!(method.as_str().parse::<AuthMethod>(), Ok(method));
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        let err = "Basic".parse::<AuthMethod>().expect_err("not a known spelling");
        assert_eq!(err.0, "Basic");
        assert!("".parse::<AuthMethod>().is_err());
    }

    #[test]
    fn supported_methods_lists_every_name() {
        assert_eq!(
            AuthMethod::supported_methods(),
            "basic, env, instance, profile, properties, anonymous, session and default"
        );
    }

    #[test]
    fn default_is_basic() {
        assert_eq!(AuthMethod::default(), AuthMethod::Basic);
    }
}
