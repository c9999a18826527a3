//! Sampler for gathering per-interface counters from sysfs statistics files.

use crate::sampler::counters::{RxCounter, TxCounter};
use crate::sampler::model::{ReceiveCounters, TransmitCounters};
use crate::sampler::traits::FileSystem;
use std::collections::BTreeMap;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Interfaces are found under this directory.
pub const DEFAULT_SYSFS_PATH: &str = "/sys/class/net";

/// Interface sampled when the caller has no better idea.
pub const DEFAULT_INTERFACE: &str = "eth0";

/// Bytes read from any given counter file per refresh. This is way more
/// than a decimal u64 ever needs; a read that fills the whole buffer is
/// suspicious and gets logged.
pub const READ_SIZE: usize = 32;

/// Error type for sampling failures.
///
/// Every variant aborts the call that produced it. Counters tracked before
/// the failure keep their handles and cached values; nothing is rolled
/// back and zero is never substituted for a value that failed to refresh.
#[derive(Debug)]
pub enum SampleError {
    /// Interface directory missing or inaccessible at construction.
    InterfaceNotFound {
        interface: String,
        source: io::Error,
    },
    /// Counter file could not be opened at selection time.
    CounterOpen {
        counter: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// Seek or read failed on an already-open counter file.
    CounterRead {
        counter: &'static str,
        source: io::Error,
    },
    /// Counter file produced zero bytes; an empty pseudo-file is an error,
    /// not a reading.
    EmptyRead { counter: &'static str },
    /// Counter file content did not parse as a decimal integer.
    Parse {
        counter: &'static str,
        content: String,
    },
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::InterfaceNotFound { interface, source } => {
                write!(f, "cannot access interface '{}': {}", interface, source)
            }
            SampleError::CounterOpen {
                counter,
                path,
                source,
            } => write!(
                f,
                "opening counter file for '{}' at {}: {}",
                counter,
                path.display(),
                source
            ),
            SampleError::CounterRead { counter, source } => {
                write!(f, "reading counter '{}': {}", counter, source)
            }
            SampleError::EmptyRead { counter } => {
                write!(f, "counter '{}' returned no data", counter)
            }
            SampleError::Parse { counter, content } => write!(
                f,
                "cannot convert counter '{}' value '{}' to an integer",
                counter, content
            ),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SampleError::InterfaceNotFound { source, .. }
            | SampleError::CounterOpen { source, .. }
            | SampleError::CounterRead { source, .. } => Some(source),
            SampleError::EmptyRead { .. } | SampleError::Parse { .. } => None,
        }
    }
}

/// One tracked counter: a live handle into its sysfs file plus the value
/// parsed on the last refresh (0 before the first).
#[derive(Debug)]
struct TrackedCounter<H> {
    file: H,
    value: u64,
}

impl<H> TrackedCounter<H> {
    fn new(file: H) -> Self {
        Self { file, value: 0 }
    }
}

/// Samples selected counters of one network interface.
///
/// Counter files are pseudo-files regenerated by the kernel on each read,
/// so the sampler opens each selected file once and re-reads it from
/// offset 0 on every refresh, avoiding per-sample path resolution and
/// open/close syscalls. Handles are closed when the sampler is dropped.
///
/// Not internally synchronized: share across threads only behind external
/// serialization.
pub struct Sampler<F: FileSystem> {
    fs: F,
    interface: String,
    stats_path: PathBuf,
    rx: BTreeMap<RxCounter, TrackedCounter<F::File>>,
    tx: BTreeMap<TxCounter, TrackedCounter<F::File>>,
}

// Manual impl: a derive would demand `F::File: Debug`, and the handles are
// not interesting anyway. Summarize what the sampler is bound to and how
// much it tracks.
impl<F: FileSystem> std::fmt::Debug for Sampler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("interface", &self.interface)
            .field("stats_path", &self.stats_path)
            .field("tracked_rx", &self.rx.len())
            .field("tracked_tx", &self.tx.len())
            .finish_non_exhaustive()
    }
}

impl<F: FileSystem> Sampler<F> {
    /// Creates a sampler bound to one interface.
    ///
    /// Probes that the interface directory exists and is enumerable, then
    /// resolves the statistics path. No counter file is opened until a
    /// selection call says which counters matter.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `sysfs_path` - Base path to the interface tree (usually
    ///   [`DEFAULT_SYSFS_PATH`])
    /// * `interface` - Interface name, e.g. [`DEFAULT_INTERFACE`]
    pub fn new(
        fs: F,
        sysfs_path: impl AsRef<Path>,
        interface: impl Into<String>,
    ) -> Result<Self, SampleError> {
        let interface = interface.into();
        let interface_path = sysfs_path.as_ref().join(&interface);

        // Open and enumerate the interface dir to see that it (a) exists
        // and (b) is a dir. If that works, the statistics subdir and its
        // files are expected to be there too.
        fs.read_dir(&interface_path)
            .map_err(|e| SampleError::InterfaceNotFound {
                interface: interface.clone(),
                source: e,
            })?;

        let stats_path = interface_path.join("statistics");
        debug!(interface = %interface, path = %stats_path.display(), "resolved statistics path");

        Ok(Self {
            fs,
            interface,
            stats_path,
            rx: BTreeMap::new(),
            tx: BTreeMap::new(),
        })
    }

    /// Name of the interface this sampler is bound to.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Starts tracking the given receive counters.
    ///
    /// Each id not yet tracked gets its counter file opened and cached at
    /// value 0 until the next refresh. Already-tracked ids are skipped.
    /// An open failure aborts the call; ids opened earlier in the same
    /// call stay tracked.
    pub fn select_rx(&mut self, ids: &[RxCounter]) -> Result<(), SampleError> {
        for &id in ids {
            if self.rx.contains_key(&id) {
                debug!(counter = %id, "already tracking, ignoring request");
                continue;
            }
            let file = open_counter(&self.fs, &self.stats_path, id.filename())?;
            self.rx.insert(id, TrackedCounter::new(file));
        }
        Ok(())
    }

    /// Starts tracking the given transmit counters.
    ///
    /// Same contract as [`select_rx`](Self::select_rx).
    pub fn select_tx(&mut self, ids: &[TxCounter]) -> Result<(), SampleError> {
        for &id in ids {
            if self.tx.contains_key(&id) {
                debug!(counter = %id, "already tracking, ignoring request");
                continue;
            }
            let file = open_counter(&self.fs, &self.stats_path, id.filename())?;
            self.tx.insert(id, TrackedCounter::new(file));
        }
        Ok(())
    }

    /// Refreshes every tracked counter, receive then transmit.
    pub fn refresh(&mut self) -> Result<(), SampleError> {
        self.refresh_rx()?;
        self.refresh_tx()
    }

    /// Re-reads and re-parses every tracked receive counter.
    ///
    /// The first failing counter aborts the pass; its cached value and
    /// those of counters not yet reached are left untouched.
    pub fn refresh_rx(&mut self) -> Result<(), SampleError> {
        for (id, tracked) in self.rx.iter_mut() {
            tracked.value = sample_counter(id.filename(), &mut tracked.file)?;
        }
        Ok(())
    }

    /// Re-reads and re-parses every tracked transmit counter.
    ///
    /// Same failure contract as [`refresh_rx`](Self::refresh_rx).
    pub fn refresh_tx(&mut self) -> Result<(), SampleError> {
        for (id, tracked) in self.tx.iter_mut() {
            tracked.value = sample_counter(id.filename(), &mut tracked.file)?;
        }
        Ok(())
    }

    /// Cached value of one receive counter; 0 if it was never selected.
    pub fn rx_value(&self, id: RxCounter) -> u64 {
        self.rx.get(&id).map_or(0, |t| t.value)
    }

    /// Cached value of one transmit counter; 0 if it was never selected.
    pub fn tx_value(&self, id: TxCounter) -> u64 {
        self.tx.get(&id).map_or(0, |t| t.value)
    }

    /// Receive snapshot as of the last refresh. No I/O.
    ///
    /// Fields for counters never selected read 0, indistinguishable from
    /// a tracked counter that is genuinely zero.
    pub fn receive(&self) -> ReceiveCounters {
        ReceiveCounters {
            bytes: self.rx_value(RxCounter::Bytes),
            compressed: self.rx_value(RxCounter::Compressed),
            crc_errors: self.rx_value(RxCounter::CrcErrors),
            dropped: self.rx_value(RxCounter::Dropped),
            errors: self.rx_value(RxCounter::Errors),
            fifo_errors: self.rx_value(RxCounter::FifoErrors),
            frame_errors: self.rx_value(RxCounter::FrameErrors),
            length_errors: self.rx_value(RxCounter::LengthErrors),
            missed_errors: self.rx_value(RxCounter::MissedErrors),
            over_errors: self.rx_value(RxCounter::OverErrors),
            packets: self.rx_value(RxCounter::Packets),
        }
    }

    /// Transmit snapshot as of the last refresh. No I/O.
    pub fn transmit(&self) -> TransmitCounters {
        TransmitCounters {
            aborted_errors: self.tx_value(TxCounter::AbortedErrors),
            bytes: self.tx_value(TxCounter::Bytes),
            carrier_errors: self.tx_value(TxCounter::CarrierErrors),
            compressed: self.tx_value(TxCounter::Compressed),
            dropped: self.tx_value(TxCounter::Dropped),
            errors: self.tx_value(TxCounter::Errors),
            fifo_errors: self.tx_value(TxCounter::FifoErrors),
            heartbeat_errors: self.tx_value(TxCounter::HeartbeatErrors),
            packets: self.tx_value(TxCounter::Packets),
            window_errors: self.tx_value(TxCounter::WindowErrors),
        }
    }

    /// Bytes received as of the last refresh.
    pub fn rx_bytes(&self) -> u64 {
        self.rx_value(RxCounter::Bytes)
    }

    /// Packets received as of the last refresh.
    pub fn rx_packets(&self) -> u64 {
        self.rx_value(RxCounter::Packets)
    }

    /// Bytes transmitted as of the last refresh.
    pub fn tx_bytes(&self) -> u64 {
        self.tx_value(TxCounter::Bytes)
    }

    /// Packets transmitted as of the last refresh.
    pub fn tx_packets(&self) -> u64 {
        self.tx_value(TxCounter::Packets)
    }

    /// Number of receive counters currently tracked.
    pub fn tracked_rx(&self) -> usize {
        self.rx.len()
    }

    /// Number of transmit counters currently tracked.
    pub fn tracked_tx(&self) -> usize {
        self.tx.len()
    }
}

fn open_counter<F: FileSystem>(
    fs: &F,
    stats_path: &Path,
    counter: &'static str,
) -> Result<F::File, SampleError> {
    let path = stats_path.join(counter);
    debug!(counter, path = %path.display(), "opening counter file");
    fs.open(&path).map_err(|e| SampleError::CounterOpen {
        counter,
        path,
        source: e,
    })
}

/// Rewinds an open counter file and parses its current content.
///
/// Interrupted reads are retried; any other failure leaves the caller's
/// cached value untouched.
fn sample_counter<H: Read + Seek>(
    counter: &'static str,
    file: &mut H,
) -> Result<u64, SampleError> {
    // Rewind to the beginning to read the regenerated value.
    file.seek(SeekFrom::Start(0))
        .map_err(|e| SampleError::CounterRead { counter, source: e })?;

    let mut buf = [0u8; READ_SIZE];
    let n = loop {
        match file.read(&mut buf) {
            Ok(n) => break n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SampleError::CounterRead { counter, source: e }),
        }
    };

    if n == 0 {
        return Err(SampleError::EmptyRead { counter });
    }
    if n == READ_SIZE {
        // The parse below is the real validation; this just flags it.
        warn!(counter, len = n, "read filled the whole buffer");
    }

    let text = String::from_utf8_lossy(&buf[..n]);
    let text = text.trim();
    // The kernel prints these unsigned, but parse signed and reinterpret
    // so a misbehaving driver maps to a deterministic value.
    let value = text.parse::<i64>().map_err(|_| SampleError::Parse {
        counter,
        content: text.to_string(),
    })?;

    Ok(value as u64)
}
