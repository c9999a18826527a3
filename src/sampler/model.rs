//! Snapshot aggregates of per-interface counter values.
//!
//! These structures hold the counter values cached by the last refresh,
//! one field per counter the kernel publishes for that direction. A field
//! whose counter was never selected for tracking reads 0; that is
//! indistinguishable from a tracked counter that is genuinely zero.

use serde::{Deserialize, Serialize};

/// Receive-direction counter values as of the last refresh.
///
/// Source: `/sys/class/net/<iface>/statistics/rx_*`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct ReceiveCounters {
    /// Bytes received.
    /// Source: `rx_bytes`
    pub bytes: u64,

    /// Compressed packets received.
    /// Source: `rx_compressed`
    pub compressed: u64,

    /// Packets received with a CRC error.
    /// Source: `rx_crc_errors`
    pub crc_errors: u64,

    /// Packets dropped for lack of resources.
    /// Source: `rx_dropped`
    pub dropped: u64,

    /// Total bad packets received.
    /// Source: `rx_errors`
    pub errors: u64,

    /// Receiver FIFO overruns.
    /// Source: `rx_fifo_errors`
    pub fifo_errors: u64,

    /// Packets received with a framing error.
    /// Source: `rx_frame_errors`
    pub frame_errors: u64,

    /// Packets received with a bad length.
    /// Source: `rx_length_errors`
    pub length_errors: u64,

    /// Packets missed by the receiver.
    /// Source: `rx_missed_errors`
    pub missed_errors: u64,

    /// Receiver ring-buffer overruns.
    /// Source: `rx_over_errors`
    pub over_errors: u64,

    /// Packets received.
    /// Source: `rx_packets`
    pub packets: u64,
}

/// Transmit-direction counter values as of the last refresh.
///
/// Source: `/sys/class/net/<iface>/statistics/tx_*`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct TransmitCounters {
    /// Transmissions aborted.
    /// Source: `tx_aborted_errors`
    pub aborted_errors: u64,

    /// Bytes transmitted.
    /// Source: `tx_bytes`
    pub bytes: u64,

    /// Carrier losses during transmission.
    /// Source: `tx_carrier_errors`
    pub carrier_errors: u64,

    /// Compressed packets transmitted.
    /// Source: `tx_compressed`
    pub compressed: u64,

    /// Packets dropped before transmission.
    /// Source: `tx_dropped`
    pub dropped: u64,

    /// Total packet transmit problems.
    /// Source: `tx_errors`
    pub errors: u64,

    /// Transmit FIFO underruns.
    /// Source: `tx_fifo_errors`
    pub fifo_errors: u64,

    /// Heartbeat errors during transmission.
    /// Source: `tx_heartbeat_errors`
    pub heartbeat_errors: u64,

    /// Packets transmitted.
    /// Source: `tx_packets`
    pub packets: u64,

    /// Window errors during transmission.
    /// Source: `tx_window_errors`
    pub window_errors: u64,
}
