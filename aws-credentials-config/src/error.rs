/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Configuration errors raised while resolving a credentials source

use std::fmt;

/// A credentials configuration could not be turned into a credentials source
///
/// These are never transient: the configuration must be corrected before retrying. Field names
/// carried by each variant are the option names as the user wrote them, including any prefix
/// (e.g. `aws_access_key_id`).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// `auth_method` is not one of the supported methods
    #[error(
        "Unknown {option} '{method}'. Supported methods are {}.",
        crate::AuthMethod::supported_methods()
    )]
    UnknownMethod {
        /// Name of the discriminator option, e.g. `aws_auth_method`
        option: String,
        /// The value that could not be recognized
        method: String,
    },

    /// A field required by the selected method was not set
    #[error("Required option is not set: {}", QuotedList(.fields))]
    MissingRequiredField {
        /// The missing field followed by the fields that must accompany it
        fields: Vec<String>,
    },

    /// A field the selected method does not accept was set
    #[error("Invalid option is set: {field}")]
    ConflictingField {
        /// The offending field
        field: String,
    },

    /// The method is recognized but deliberately disabled
    #[error("{option} '{method}' is not supported: {reason}")]
    UnsupportedMethod {
        /// Name of the discriminator option, e.g. `aws_auth_method`
        option: String,
        /// The disabled method
        method: String,
        /// Why, and what to use instead
        reason: String,
    },

    /// A field was set to a value that cannot be used
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// The offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigurationError {
    /// The field this error is about, if any
    ///
    /// For [`MissingRequiredField`](ConfigurationError::MissingRequiredField) this is the field
    /// that is actually absent.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigurationError::MissingRequiredField { fields } => {
                fields.first().map(String::as_str)
            }
            ConfigurationError::ConflictingField { field }
            | ConfigurationError::InvalidValue { field, .. } => Some(field),
            ConfigurationError::UnknownMethod { option, .. }
            | ConfigurationError::UnsupportedMethod { option, .. } => Some(option),
        }
    }
}

struct QuotedList<'a>(&'a [String]);

impl fmt::Display for QuotedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, item) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::ConfigurationError;

    #[test]
    fn missing_field_lists_every_name() {
        let err = ConfigurationError::MissingRequiredField {
            fields: vec!["aws_secret_access_key".into(), "aws_session_token".into()],
        };
        assert_eq!(
            err.to_string(),
            "Required option is not set: 'aws_secret_access_key', 'aws_session_token'"
        );
        assert_eq!(err.field(), Some("aws_secret_access_key"));
    }

    #[test]
    fn unknown_method_enumerates_supported_methods() {
        let err = ConfigurationError::UnknownMethod {
            option: "auth_method".into(),
            method: "bogus".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown auth_method 'bogus'. Supported methods are basic, env, instance, profile, properties, anonymous, session and default."
        );
    }
}
