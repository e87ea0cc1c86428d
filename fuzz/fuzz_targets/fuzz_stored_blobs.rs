//! Fuzz target: decoding persisted blobs
//!
//! Feeds arbitrary bytes to every postcard decoder that reads NVS:
//! configuration, heartbeat snapshot and fault records. Corrupted flash
//! must surface as an error, never as a panic.
//!
//! cargo fuzz run fuzz_stored_blobs

#![no_main]

use libfuzzer_sys::fuzz_target;
use seatheater::config::SystemConfig;
use seatheater::diagnostics::{DiagnosticsRecord, HeartbeatSnapshot};

fuzz_target!(|data: &[u8]| {
    let _ = postcard::from_bytes::<SystemConfig>(data);
    let _ = postcard::from_bytes::<HeartbeatSnapshot>(data);
    if let Ok(record) = postcard::from_bytes::<DiagnosticsRecord>(data) {
        // Every decodable record maps back to one of the four messages.
        let msg = record.message();
        assert!(msg.ends_with(" Over 40") || msg.ends_with(" Below 5"));
    }
});
