//! # Engine Module
//!
//! The glue between the stateless [`core`](crate::core) building blocks and the
//! [`workflows`](crate::workflows).
//!
//! - **Configuration** ([`config`]) - Builders for the parameters of each workflow
//! - **Error Handling** ([`error`]) - [`EngineError`](error::EngineError), the error every
//!   workflow returns
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **External Services** ([`services`]) - Traits for structure preparation, format
//!   conversion and pose search

pub mod config;
pub mod error;
pub mod progress;
pub mod services;
