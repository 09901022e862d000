//! agentproof Client
//!
//! Collaborator implementations for the resolution flow:
//! - [`HttpProofSource`]: fetches proof packages over HTTP
//! - [`MockRegistry`], [`MockMarket`], [`StaticProofSource`]: in-memory versions with
//!   call counters, for tests and dry runs
//!
//! # Examples
//!
//! ```no_run
//! use agentproof_client::HttpProofSource;
//! use agentproof_domain::traits::ProofSource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpProofSource::with_default_timeout()?;
//! let package = source
//!     .fetch_from_agent("http://localhost:4000", "market-1", Some("payment-token"))
//!     .await?;
//! println!("{} entries", package.logs.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod http;
mod mock;

pub use error::{ClientError, MockError};
pub use http::{HttpProofSource, DEFAULT_TIMEOUT_SECS};
pub use mock::{MockMarket, MockRegistry, StaticProofSource};
