//! # entwine-std
//!
//! Standard consumers for the Entwine method-interception engine: thin
//! applications of a [`Loom`] with a pre-wired hook configuration.
//!
//! - [`CallCount`]: tallies calls per qualified method name
//! - [`CallTrace`]: reports each outer call as it happens
//!
//! [`Loom`]: entwine::Loom

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod count;
mod trace;

pub use count::CallCount;
pub use trace::CallTrace;
