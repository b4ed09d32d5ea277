//! Shared host capabilities for the yield staking contracts.
//!
//! This crate provides:
//! - [`clock::Clock`]: the time source handed to the accounting core.
//! - [`ownership`]: single-owner gate with a two-step transfer.
//! - [`pausable`]: the pause gate guarding user-facing mutations.
//! - [`fees`]: fee basis points validated for bounds and stored for the host.
//! - [`math`]: checked fixed-point helpers shared by both reward engines.
//! - [`storage`]: TTL policy applied to every write.
//!
//! Helpers here never return contract errors; they answer with `bool` or
//! `Option` and each contract maps the answer onto its own error enum.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod clock;
pub mod fees;
pub mod math;
pub mod ownership;
pub mod pausable;
pub mod storage;

pub use clock::Clock;
pub use fees::FeeConfig;
