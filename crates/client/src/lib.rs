//! zoochat_client - CLI client for the zoochat API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::ZoochatClient;
pub use error::{ClientError, Result};
