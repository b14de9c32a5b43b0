//! Recovery tests for the WAL-backed ledger
//!
//! These tests simulate crashes by editing the log file between opens:
//! - Torn final frame (partial append)
//! - Corrupted payload bytes
//! - Guarded commits surviving reopen

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;
use std::thread;

use kiosklog_core::{Key, Ledger, Version, WriteBatch};
use kiosklog_storage::{DurabilityMode, WalLedger};
use tempfile::TempDir;

fn wal_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("kiosklog.wal")
}

#[test]
fn test_torn_tail_is_truncated_on_open() {
    let dir = TempDir::new().unwrap();
    let path = wal_path(&dir);

    let intact_len = {
        let ledger = WalLedger::open(&path, DurabilityMode::Standard).unwrap();
        ledger.put(Key::raw("a"), b"1".to_vec()).unwrap();
        ledger.put(Key::raw("b"), b"2".to_vec()).unwrap();
        ledger.size()
    };

    // Half a header from an interrupted append
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&[0x10, 0x00, 0x00]).unwrap();
    drop(file);

    let ledger = WalLedger::open(&path, DurabilityMode::Standard).unwrap();
    assert_eq!(ledger.current_version(), Version(2));
    assert_eq!(fs::metadata(&path).unwrap().len(), intact_len);

    // New commits land after the intact prefix and survive another reopen
    ledger.put(Key::raw("c"), b"3".to_vec()).unwrap();
    drop(ledger);

    let ledger = WalLedger::open(&path, DurabilityMode::Standard).unwrap();
    assert_eq!(ledger.current_version(), Version(3));
    assert_eq!(ledger.get(&Key::raw("c")).unwrap().unwrap().value, b"3");
}

#[test]
fn test_corrupted_last_frame_is_dropped() {
    let dir = TempDir::new().unwrap();
    let path = wal_path(&dir);

    let first_len = {
        let ledger = WalLedger::open(&path, DurabilityMode::Standard).unwrap();
        ledger.put(Key::raw("a"), b"1".to_vec()).unwrap();
        let len = ledger.size();
        ledger.put(Key::raw("b"), b"2".to_vec()).unwrap();
        len
    };

    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    let ledger = WalLedger::open(&path, DurabilityMode::Standard).unwrap();
    assert_eq!(ledger.current_version(), Version(1));
    assert!(ledger.get(&Key::raw("a")).unwrap().is_some());
    assert!(ledger.get(&Key::raw("b")).unwrap().is_none());
    assert_eq!(ledger.size(), first_len);
}

#[test]
fn test_batch_is_recovered_whole() {
    let dir = TempDir::new().unwrap();
    let path = wal_path(&dir);

    {
        let ledger = WalLedger::open(&path, DurabilityMode::Always).unwrap();
        let mut batch = WriteBatch::new();
        batch
            .guard(Key::activity_index(), Version::ZERO)
            .put(Key::activity(0), b"record".to_vec())
            .put(Key::activity_index(), b"index".to_vec());
        ledger.commit(batch).unwrap();
    }

    let ledger = WalLedger::open(&path, DurabilityMode::Standard).unwrap();
    let record = ledger.get(&Key::activity(0)).unwrap().unwrap();
    let index = ledger.get(&Key::activity_index()).unwrap().unwrap();
    assert_eq!(record.version, index.version);
    assert_eq!(index.value, b"index");
}

#[test]
fn test_concurrent_commits_replay_in_version_order() {
    let dir = TempDir::new().unwrap();
    let path = wal_path(&dir);

    {
        let ledger = Arc::new(WalLedger::open(&path, DurabilityMode::Standard).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for i in 0..25 {
                        ledger
                            .put(Key::raw(&format!("t{}-{}", t, i)), vec![t as u8, i as u8])
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(ledger.current_version(), Version(100));
    }

    let ledger = WalLedger::open(&path, DurabilityMode::Standard).unwrap();
    assert_eq!(ledger.current_version(), Version(100));
    for t in 0..4u8 {
        for i in 0..25u8 {
            let got = ledger.get(&Key::raw(&format!("t{}-{}", t, i))).unwrap().unwrap();
            assert_eq!(got.value, vec![t, i]);
        }
    }
}
