//! scout-s3: S3 backend for the scout browsing engine
//!
//! This crate provides the implementation of the ObjectBrowser trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK; error classification and the retry loop
//! live here as well.

mod classify;
mod retry;

pub mod client;

pub use client::{BrowserOptions, S3Browser, StaticCredentials};
