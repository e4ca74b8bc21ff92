//! Wire types for the embedded player provider.
//!
//! This crate contains the serde-serializable types exchanged with the
//! host-provided player widget: the event and method name catalogs, the
//! caller-facing configuration object, and the provider-side enums. These
//! types represent the "protocol layer" - the shapes of data as they appear
//! at the provider boundary.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization and name transforms
//! - **Injectable**: The catalogs are ordered lists owned by the caller, not
//!   hard-coded knowledge of the core; `Catalog::default()` matches the
//!   provider version this repository targets
//! - **Stable**: Changes only when the provider surface changes
//!
//! Higher-level ergonomic APIs are built on top of these types in `ytp-rs`.

pub mod catalog;
pub mod options;
pub mod types;

pub use catalog::*;
pub use options::*;
pub use types::*;
