//! ytp-runtime - Provider loading, deferred readiness, and event dispatch
//!
//! This crate provides the low-level infrastructure for talking to the
//! host-provided player widget:
//!
//! - **Provider loading**: Triggering the one-time provider bootstrap and
//!   memoizing its deferred handle
//! - **Deferred values**: One-shot, multi-observer readiness handoff
//! - **Event bus**: Name-keyed synchronous publish/subscribe dispatch
//! - **Provider seam**: Traits the host environment implements
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   ytp-rs    │  Player facade, factory, proxies
//! └──────┬──────┘
//!        │ implements nothing, consumes everything below
//! ┌──────▼──────┐
//! │ ytp-runtime │  This crate
//! │  ┌────────┐ │
//! │  │ Loader │ │  One-time provider bootstrap
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Bus    │ │  Event fan-out
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Seam   │ │  HostEnvironment / Provider / PlayerHandle
//! │  └────────┘ │
//! └─────────────┘
//! ```
//!
//! # Decoupling via the provider seam
//!
//! The loader and facade never touch the host document directly. A
//! [`HostEnvironment`] implementation - a webview bridge, a wasm shim, or a
//! test mock - owns script injection and element lookup, which keeps this
//! crate host-agnostic and testable.

pub mod bus;
pub mod deferred;
pub mod error;
pub mod loader;
pub mod provider;

// Re-export key types at crate root
pub use bus::EventBus;
pub use deferred::Deferred;
pub use error::{Error, Result};
pub use loader::ProviderLoader;
pub use provider::{BoxFuture, EventSlots, HostEnvironment, PlayerHandle, Provider};
