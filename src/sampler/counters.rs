//! Counter identifiers and their sysfs filename catalog.
//!
//! The kernel publishes one decimal pseudo-file per counter under
//! `/sys/class/net/<iface>/statistics/`. The enums below are closed: the
//! filename lookup is a total `match`, so there is no runtime catalog to
//! build and nothing to race on first use.

use serde::{Deserialize, Serialize};

/// Receive-direction counter kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RxCounter {
    Bytes,
    Compressed,
    CrcErrors,
    Dropped,
    Errors,
    FifoErrors,
    FrameErrors,
    LengthErrors,
    MissedErrors,
    OverErrors,
    Packets,
}

/// Transmit-direction counter kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TxCounter {
    AbortedErrors,
    Bytes,
    CarrierErrors,
    Compressed,
    Dropped,
    Errors,
    FifoErrors,
    HeartbeatErrors,
    Packets,
    WindowErrors,
}

impl RxCounter {
    /// Every receive counter the kernel publishes.
    pub const ALL: [RxCounter; 11] = [
        RxCounter::Bytes,
        RxCounter::Compressed,
        RxCounter::CrcErrors,
        RxCounter::Dropped,
        RxCounter::Errors,
        RxCounter::FifoErrors,
        RxCounter::FrameErrors,
        RxCounter::LengthErrors,
        RxCounter::MissedErrors,
        RxCounter::OverErrors,
        RxCounter::Packets,
    ];

    /// Filename of this counter inside the interface statistics directory.
    pub const fn filename(self) -> &'static str {
        match self {
            RxCounter::Bytes => "rx_bytes",
            RxCounter::Compressed => "rx_compressed",
            RxCounter::CrcErrors => "rx_crc_errors",
            RxCounter::Dropped => "rx_dropped",
            RxCounter::Errors => "rx_errors",
            RxCounter::FifoErrors => "rx_fifo_errors",
            RxCounter::FrameErrors => "rx_frame_errors",
            RxCounter::LengthErrors => "rx_length_errors",
            RxCounter::MissedErrors => "rx_missed_errors",
            RxCounter::OverErrors => "rx_over_errors",
            RxCounter::Packets => "rx_packets",
        }
    }
}

impl TxCounter {
    /// Every transmit counter the kernel publishes.
    pub const ALL: [TxCounter; 10] = [
        TxCounter::AbortedErrors,
        TxCounter::Bytes,
        TxCounter::CarrierErrors,
        TxCounter::Compressed,
        TxCounter::Dropped,
        TxCounter::Errors,
        TxCounter::FifoErrors,
        TxCounter::HeartbeatErrors,
        TxCounter::Packets,
        TxCounter::WindowErrors,
    ];

    /// Filename of this counter inside the interface statistics directory.
    pub const fn filename(self) -> &'static str {
        match self {
            TxCounter::AbortedErrors => "tx_aborted_errors",
            TxCounter::Bytes => "tx_bytes",
            TxCounter::CarrierErrors => "tx_carrier_errors",
            TxCounter::Compressed => "tx_compressed",
            TxCounter::Dropped => "tx_dropped",
            TxCounter::Errors => "tx_errors",
            TxCounter::FifoErrors => "tx_fifo_errors",
            TxCounter::HeartbeatErrors => "tx_heartbeat_errors",
            TxCounter::Packets => "tx_packets",
            TxCounter::WindowErrors => "tx_window_errors",
        }
    }
}

// Diagnostics print the sysfs filename: it is the one name a reader can
// correlate with both the kernel documentation and an strace.
impl std::fmt::Display for RxCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.filename())
    }
}

impl std::fmt::Display for TxCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.filename())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete() {
        assert_eq!(RxCounter::ALL.len(), 11);
        assert_eq!(TxCounter::ALL.len(), 10);
    }

    #[test]
    fn test_rx_filenames_carry_direction_prefix() {
        for c in RxCounter::ALL {
            assert!(c.filename().starts_with("rx_"), "{}", c);
        }
    }

    #[test]
    fn test_tx_filenames_carry_direction_prefix() {
        for c in TxCounter::ALL {
            assert!(c.filename().starts_with("tx_"), "{}", c);
        }
    }

    #[test]
    fn test_filenames_are_distinct() {
        let mut names: Vec<&str> = RxCounter::ALL.iter().map(|c| c.filename()).collect();
        names.extend(TxCounter::ALL.iter().map(|c| c.filename()));
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn test_display_matches_filename() {
        assert_eq!(RxCounter::Bytes.to_string(), "rx_bytes");
        assert_eq!(TxCounter::WindowErrors.to_string(), "tx_window_errors");
    }
}
