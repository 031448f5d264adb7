/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Credentials providers for SDK clients
//!
//! [`SdkProviderFactory`] turns a resolved [`CredentialsSource`](crate::CredentialsSource) into an
//! [`aws_credential_types::provider::SharedCredentialsProvider`]. Most sources map directly onto
//! `aws-config` providers; the types here cover what `aws-config` does not.

pub mod default_chain;
mod factory;
pub mod profile;
mod properties;

pub use default_chain::DefaultChainProvider;
pub use factory::SdkProviderFactory;
pub use profile::ReloadingProfileFileProvider;
pub use properties::{SystemProperties, SystemPropertyCredentialsProvider};
