//! File-backed ledger with a write-ahead log
//!
//! `WalLedger` is a [`MemoryLedger`] whose commits are first appended to a
//! log file. Opening the ledger replays the file to rebuild the in-memory
//! state.
//!
//! ## File Format
//!
//! The file is a sequence of frames, one per committed batch:
//!
//! ```text
//! +-----------+-----------+----------------------------+
//! | len (u32) | crc (u32) | payload (MessagePack)      |
//! +-----------+-----------+----------------------------+
//! ```
//!
//! Both header integers are little-endian; `crc` is the CRC32 of the
//! payload; the payload is a [`WalRecord`] holding the commit version and
//! every key written.
//!
//! ## Recovery
//!
//! Replay stops at the first frame that is short, fails its checksum, or
//! does not decode. Such a tail can only come from a crash mid-append, so
//! it is truncated away; the commit it belonged to never returned success.
//!
//! ## Durability Modes
//!
//! - `Standard` - write each frame before the commit becomes visible
//! - `Always` - additionally fsync each frame

use byteorder::{ByteOrder, LittleEndian};
use kiosklog_core::{Error, Key, Ledger, Result, Version, VersionedBytes, WriteBatch};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::memory::MemoryLedger;

/// Size of the frame header (length + checksum)
const FRAME_HEADER_LEN: usize = 8;

/// How hard a commit pushes its frame towards the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Write the frame to the OS before acknowledging
    #[default]
    Standard,
    /// fsync the frame before acknowledging
    Always,
}

impl fmt::Display for DurabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurabilityMode::Standard => f.write_str("standard"),
            DurabilityMode::Always => f.write_str("always"),
        }
    }
}

impl FromStr for DurabilityMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "standard" => Ok(DurabilityMode::Standard),
            "always" => Ok(DurabilityMode::Always),
            other => Err(format!(
                "invalid durability mode '{}', expected \"standard\" or \"always\"",
                other
            )),
        }
    }
}

/// One committed batch as stored in the log file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalRecord {
    /// Commit version assigned by the ledger
    pub version: u64,
    /// Keys and values written by the commit
    pub writes: Vec<(Key, Vec<u8>)>,
}

/// Encode a record into a complete frame
pub fn encode_frame(record: &WalRecord) -> Result<Vec<u8>> {
    let payload = rmp_serde::to_vec(record).map_err(|e| Error::Serialization(e.to_string()))?;
    let len = u32::try_from(payload.len())
        .map_err(|_| Error::Serialization(format!("WAL record too large: {} bytes", payload.len())))?;

    let mut frame = vec![0u8; FRAME_HEADER_LEN];
    LittleEndian::write_u32(&mut frame[0..4], len);
    LittleEndian::write_u32(&mut frame[4..8], crc32fast::hash(&payload));
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode every intact frame in `buf`.
///
/// Returns the records and the byte offset just past the last intact frame.
pub fn decode_frames(buf: &[u8]) -> (Vec<WalRecord>, usize) {
    let mut records = Vec::new();
    let mut offset = 0;

    while buf.len() - offset >= FRAME_HEADER_LEN {
        let header = &buf[offset..offset + FRAME_HEADER_LEN];
        let len = LittleEndian::read_u32(&header[0..4]) as usize;
        let crc = LittleEndian::read_u32(&header[4..8]);

        let start = offset + FRAME_HEADER_LEN;
        let Some(end) = start.checked_add(len).filter(|end| *end <= buf.len()) else {
            break;
        };
        let payload = &buf[start..end];
        if crc32fast::hash(payload) != crc {
            break;
        }
        match rmp_serde::from_slice::<WalRecord>(payload) {
            Ok(record) => records.push(record),
            Err(_) => break,
        }
        offset = end;
    }

    (records, offset)
}

#[derive(Debug)]
struct WalFile {
    file: File,
    /// Length of the intact prefix of the file
    len: u64,
    /// Set when a failed append could not be rolled back
    poisoned: bool,
}

impl WalFile {
    fn append(&mut self, frame: &[u8], mode: DurabilityMode) -> Result<()> {
        if self.poisoned {
            return Err(Error::storage_unavailable(
                "write-ahead log is unusable after a failed rollback",
            ));
        }

        let written = self.file.write_all(frame).and_then(|_| match mode {
            DurabilityMode::Standard => self.file.flush(),
            DurabilityMode::Always => self.file.sync_data(),
        });

        match written {
            Ok(()) => {
                self.len += frame.len() as u64;
                Ok(())
            }
            Err(e) => {
                // Drop any partial frame so later frames stay reachable on replay
                if self.file.set_len(self.len).is_err() {
                    self.poisoned = true;
                }
                Err(Error::storage_unavailable(format!("WAL append failed: {}", e)))
            }
        }
    }
}

/// Durable ledger backed by an append-only log file
pub struct WalLedger {
    memory: MemoryLedger,
    file: Mutex<WalFile>,
    path: PathBuf,
    mode: DurabilityMode,
}

impl WalLedger {
    /// Open the log at `path`, creating it (and its parent directories) if needed.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be opened, read or repaired.
    pub fn open<P: AsRef<Path>>(path: P, mode: DurabilityMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        let (records, intact) = decode_frames(&buf);

        if intact < buf.len() {
            warn!(
                path = %path.display(),
                dropped_bytes = buf.len() - intact,
                "Truncating torn write-ahead log tail"
            );
            file.set_len(intact as u64)?;
        }

        let memory = MemoryLedger::new();
        let replayed = records.len();
        for record in records {
            memory.replay(Version(record.version), record.writes);
        }

        info!(
            path = %path.display(),
            frames = replayed,
            version = memory.current_version().as_u64(),
            "Opened write-ahead log"
        );

        Ok(Self {
            memory,
            file: Mutex::new(WalFile {
                file,
                len: intact as u64,
                poisoned: false,
            }),
            path,
            mode,
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durability mode the ledger was opened with
    pub fn durability_mode(&self) -> DurabilityMode {
        self.mode
    }

    /// Current size of the intact log in bytes
    pub fn size(&self) -> u64 {
        self.file.lock().len
    }
}

impl Ledger for WalLedger {
    fn get(&self, key: &Key) -> Result<Option<VersionedBytes>> {
        self.memory.get(key)
    }

    fn put(&self, key: Key, value: Vec<u8>) -> Result<Version> {
        let mut batch = WriteBatch::new();
        batch.put(key, value);
        self.commit(batch)
    }

    fn commit(&self, batch: WriteBatch) -> Result<Version> {
        let mode = self.mode;
        self.memory.commit_with(batch, |version, writes| {
            let frame = encode_frame(&WalRecord {
                version: version.as_u64(),
                writes: writes.to_vec(),
            })?;
            self.file.lock().append(&frame, mode)
        })
    }

    fn current_version(&self) -> Version {
        self.memory.current_version()
    }
}

impl fmt::Debug for WalLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalLedger")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("version", &self.memory.current_version())
            .finish()
    }
}
