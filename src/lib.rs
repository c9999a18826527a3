//! ifstats — per-interface network counter sampling.
//!
//! Provides:
//! - `sampler` — sysfs counter-file sampling (selection, refresh, snapshots)
//!
//! The sampler reads the kernel's per-interface statistics files under
//! `/sys/class/net/<iface>/statistics/` through an injectable filesystem
//! abstraction, so everything is testable without a real network interface.

pub mod sampler;
