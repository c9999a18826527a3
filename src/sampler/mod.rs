//! Network interface counter sampler for Linux.
//!
//! This module samples the kernel's per-interface statistics counters from
//! the sysfs filesystem, with support for mocking for testing off-Linux.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      Sampler                           │
//! │  - /sys/class/net/<iface>/statistics/rx_*              │
//! │  - /sys/class/net/<iface>/statistics/tx_*              │
//! │  - one persistent handle per selected counter          │
//! │                                                        │
//! │                  ┌──────────────┐                      │
//! │                  │  FileSystem  │ (trait)              │
//! │                  └──────┬───────┘                      │
//! └─────────────────────────┼──────────────────────────────┘
//!                           │
//!               ┌───────────┴───────────┐
//!               │                       │
//!        ┌──────▼──────┐         ┌──────▼──────┐
//!        │   RealFs    │         │   MockFs    │
//!        │  (Linux)    │         │  (Testing)  │
//!        └─────────────┘         └─────────────┘
//! ```
//!
//! Counter files are pseudo-files regenerated by the kernel on each read, so
//! the sampler keeps every selected file open for its whole lifetime and
//! re-reads from offset 0 on each refresh instead of paying path resolution
//! and open/close syscalls per sample.
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use ifstats::sampler::{DEFAULT_INTERFACE, DEFAULT_SYSFS_PATH, RealFs, RxCounter, Sampler};
//!
//! let mut sampler = Sampler::new(RealFs::new(), DEFAULT_SYSFS_PATH, DEFAULT_INTERFACE)?;
//! sampler.select_rx(&[RxCounter::Bytes, RxCounter::Packets])?;
//! sampler.refresh()?;
//! println!("rx bytes: {}", sampler.rx_bytes());
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use ifstats::sampler::{MockFs, RxCounter, Sampler};
//!
//! let fs = MockFs::with_interface("eth0");
//! let mut sampler = Sampler::new(fs, "/sys/class/net", "eth0").unwrap();
//! sampler.select_rx(&[RxCounter::Bytes]).unwrap();
//! sampler.refresh().unwrap();
//! assert_eq!(sampler.rx_bytes(), 0);
//! ```

pub mod counters;
pub mod mock;
pub mod model;
#[allow(clippy::module_inception)]
mod sampler;
pub mod traits;

pub use counters::{RxCounter, TxCounter};
pub use mock::MockFs;
pub use model::{ReceiveCounters, TransmitCounters};
pub use sampler::{DEFAULT_INTERFACE, DEFAULT_SYSFS_PATH, READ_SIZE, SampleError, Sampler};
pub use traits::{FileSystem, RealFs};
