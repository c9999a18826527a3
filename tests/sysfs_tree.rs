//! Integration tests driving the sampler through `RealFs` against a
//! fabricated sysfs tree in a temp directory. This exercises the real
//! persistent-handle protocol: files rewritten in place are re-read from
//! offset 0 through the handles opened at selection time.

use ifstats::sampler::{RealFs, RxCounter, SampleError, Sampler, TxCounter};
use std::fs;
use std::path::Path;

fn fake_sysfs(root: &Path, interface: &str) {
    let stats = root.join(interface).join("statistics");
    fs::create_dir_all(&stats).unwrap();
    for c in RxCounter::ALL {
        fs::write(stats.join(c.filename()), "0\n").unwrap();
    }
    for c in TxCounter::ALL {
        fs::write(stats.join(c.filename()), "0\n").unwrap();
    }
}

#[test]
fn samples_and_resamples_through_real_files() {
    let dir = tempfile::tempdir().unwrap();
    fake_sysfs(dir.path(), "eth0");
    let stats = dir.path().join("eth0").join("statistics");

    let mut sampler = Sampler::new(RealFs::new(), dir.path(), "eth0").unwrap();
    sampler
        .select_rx(&[RxCounter::Bytes, RxCounter::Packets])
        .unwrap();
    sampler.select_tx(&[TxCounter::Bytes]).unwrap();

    fs::write(stats.join("rx_bytes"), "123456789\n").unwrap();
    fs::write(stats.join("rx_packets"), "4321\n").unwrap();
    fs::write(stats.join("tx_bytes"), "999\n").unwrap();
    sampler.refresh().unwrap();

    assert_eq!(sampler.rx_bytes(), 123456789);
    assert_eq!(sampler.rx_packets(), 4321);
    assert_eq!(sampler.tx_bytes(), 999);
    // Never selected, reads zero.
    assert_eq!(sampler.tx_packets(), 0);

    // Rewrite in place and resample through the same open handles.
    fs::write(stats.join("rx_bytes"), "223456789\n").unwrap();
    sampler.refresh().unwrap();
    assert_eq!(sampler.rx_bytes(), 223456789);
}

#[test]
fn missing_interface_is_a_construction_error() {
    let dir = tempfile::tempdir().unwrap();
    fake_sysfs(dir.path(), "eth0");

    let result = Sampler::new(RealFs::new(), dir.path(), "eth1");
    assert!(matches!(
        result.unwrap_err(),
        SampleError::InterfaceNotFound { .. }
    ));
}

#[test]
fn missing_counter_file_aborts_selection() {
    let dir = tempfile::tempdir().unwrap();
    fake_sysfs(dir.path(), "eth0");
    let stats = dir.path().join("eth0").join("statistics");
    fs::remove_file(stats.join("rx_dropped")).unwrap();

    let mut sampler = Sampler::new(RealFs::new(), dir.path(), "eth0").unwrap();
    let result = sampler.select_rx(&[RxCounter::Bytes, RxCounter::Dropped]);
    assert!(matches!(
        result.unwrap_err(),
        SampleError::CounterOpen { counter: "rx_dropped", .. }
    ));

    // The counter that failed to open stays untracked and reads zero.
    sampler.refresh().unwrap();
    assert_eq!(sampler.rx_value(RxCounter::Dropped), 0);
    assert_eq!(sampler.tracked_rx(), 1);
}

#[test]
fn full_catalog_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    fake_sysfs(dir.path(), "bond0");
    let stats = dir.path().join("bond0").join("statistics");

    for (i, c) in RxCounter::ALL.iter().enumerate() {
        fs::write(stats.join(c.filename()), format!("{}\n", (i + 1) * 11)).unwrap();
    }
    for (i, c) in TxCounter::ALL.iter().enumerate() {
        fs::write(stats.join(c.filename()), format!("{}\n", (i + 1) * 7)).unwrap();
    }

    let mut sampler = Sampler::new(RealFs::new(), dir.path(), "bond0").unwrap();
    sampler.select_rx(&RxCounter::ALL).unwrap();
    sampler.select_tx(&TxCounter::ALL).unwrap();
    sampler.refresh().unwrap();

    for (i, c) in RxCounter::ALL.iter().enumerate() {
        assert_eq!(sampler.rx_value(*c), ((i + 1) * 11) as u64, "{}", c);
    }
    for (i, c) in TxCounter::ALL.iter().enumerate() {
        assert_eq!(sampler.tx_value(*c), ((i + 1) * 7) as u64, "{}", c);
    }
}
