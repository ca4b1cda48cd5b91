//! AWS Lambda integration for the serverless API handler.
//!
//! This crate owns runtime concerns (environment configuration, stderr log
//! rendering, and the Lambda event entry point) around the dispatcher in
//! `serverless_api_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
