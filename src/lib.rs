//! Wrap errors with context and keep the way back to the cause.
//!
//! ```
//! use fail::{first, last, second, wrap, Fail};
//!
//! let cause = Fail::msg("C");
//! let err = wrap(wrap(cause.clone(), "M"), "T");
//!
//! assert_eq!(err.to_string(), "T");
//! assert_eq!(first(&err).to_string(), "T");
//! assert_eq!(second(&err).to_string(), "M");
//! assert!(last(&err).ptr_eq(&cause));
//!
//! // `{:+}` prints the stack captured by the outer `wrap` instead
//! assert_ne!(format!("{:+}", err), format!("{}", err));
//! ```
pub mod chain;
pub mod config;
pub mod error;
pub mod logging;
pub mod trace;

pub use chain::{first, last, second, wrap, wrap_with, Fail, Message, Node, ResultExt, Verb, Wrapper};
pub use error::ErrorExt;
