//! The process-wide slot is shared by every test in a binary, so all of
//! its behavior is exercised from a single test in its own file.

mod common;

use std::sync::Arc;

use common::{fixture_path, temp_config};
use schedcfg::config::{LoaderOptions, global};
use schedcfg::error::ConfigErrorKind;

#[test]
fn global_slot_is_filled_once() {
    assert!(global::get().is_none());

    // A failed load installs nothing.
    let bad = temp_config("num-cpu 0\n");
    let err = global::load_global(bad.path(), LoaderOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::RangeViolation);
    assert!(global::get().is_none());

    let loaded = global::load_global(&fixture_path("fcfs_only.txt"), LoaderOptions::default())
        .expect("fcfs_only.txt should load");
    let installed = global::get().expect("configuration should be installed");
    assert!(Arc::ptr_eq(&installed, &loaded.config));
    assert_eq!(installed.cpu_count(), 8);

    // Later attempts are refused and the original stays in place.
    let again = global::load_global(&fixture_path("full.txt"), LoaderOptions::default());
    assert_eq!(again.unwrap_err().kind(), ConfigErrorKind::AlreadyInstalled);
    let direct = global::install(Arc::new(Default::default()));
    assert_eq!(direct.unwrap_err().kind(), ConfigErrorKind::AlreadyInstalled);
    assert_eq!(global::get().unwrap().cpu_count(), 8);

    // Readers on other threads see the same frozen set.
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| global::get().map(|c| c.cpu_count())))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(8));
    }
}
