//! Tier 4: persistence across reopen.

use crate::test_utils::*;
use kiosklog::{AccessMode, Error, KioskLog, KioskLogConfig, OpenOptions, CONFIG_FILE_NAME};

#[test]
fn test_log_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let before = {
        let log = KioskLog::open(dir.path()).unwrap();
        for kiosk in ["K-1", "K-2", "K-3"] {
            log.create_activity(restock(kiosk)).unwrap();
        }
        log.write_key("motd", "hello").unwrap();
        log.view_activities(&everything()).unwrap()
    };

    let log = KioskLog::open(dir.path()).unwrap();
    assert_eq!(log.view_activities(&everything()).unwrap(), before);
    assert_eq!(log.read_key("motd").unwrap(), "hello");
    assert_eq!(log.create_activity(restock("K-4")).unwrap().id, 3);
}

#[test]
fn test_open_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();
    KioskLog::open(dir.path()).unwrap();
    let cfg = KioskLogConfig::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(cfg, KioskLogConfig::default());
}

#[test]
fn test_open_options_persist_into_config() {
    let dir = tempfile::tempdir().unwrap();
    {
        KioskLog::open_with(
            dir.path(),
            OpenOptions::new().durability("always").append_strategy("serialized"),
        )
        .unwrap();
    }
    let cfg = KioskLogConfig::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(cfg.durability, "always");
    assert_eq!(cfg.append_strategy, "serialized");
}

#[test]
fn test_invalid_override_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = KioskLog::open_with(dir.path(), OpenOptions::new().durability("sometimes"));
    assert!(matches!(result, Err(Error::InvalidInput { .. })));
}

#[test]
fn test_read_only_reopen_serves_reads() {
    let dir = tempfile::tempdir().unwrap();
    {
        let log = KioskLog::open(dir.path()).unwrap();
        log.create_activity(restock("K-1")).unwrap();
    }
    let log = KioskLog::open_with(dir.path(), OpenOptions::new().access_mode(AccessMode::ReadOnly))
        .unwrap();
    assert_eq!(log.activity_len().unwrap(), 1);
    assert!(matches!(
        log.write_key("motd", "x"),
        Err(Error::AccessDenied { .. })
    ));
}
