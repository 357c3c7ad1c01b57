//! Exa API domain.
//!
//! A thin typed client over the Exa endpoints the tools need:
//! `/search`, `/contents` and the research task API.

mod client;
mod error;
pub mod types;

pub use client::ExaClient;
pub use error::{ExaError, ExaResult};

/// Default number of results a search tool asks for.
pub const DEFAULT_NUM_RESULTS: usize = 5;

/// Default number of page-text characters returned per result.
pub const DEFAULT_MAX_CHARACTERS: usize = 3000;

/// Default base URL of the Exa API.
pub const DEFAULT_BASE_URL: &str = "https://api.exa.ai";
