//! Fuzz target: `FaultLog` ring buffer
//!
//! Drives arbitrary append / corrupt / restart sequences and checks:
//! - No panics
//! - `read_all` and `count` never exceed `FAULT_LOG_SLOTS`
//! - `clear` empties the ring
//!
//! cargo fuzz run fuzz_fault_log

#![no_main]

use libfuzzer_sys::fuzz_target;
use seatheater::app::ports::{StorageError, StoragePort};
use seatheater::diagnostics::{DiagEvent, DiagnosticsRecord, FAULT_LOG_SLOTS, FaultLog};
use std::collections::HashMap;

// ── In-memory StoragePort for fuzz testing ────────────────────

struct MemStore {
    data: HashMap<String, Vec<u8>>,
}

impl StoragePort for MemStore {
    fn read(&self, ns: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.data.get(&format!("{ns}::{key}")) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, ns: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.data.insert(format!("{ns}::{key}"), data.to_vec());
        Ok(())
    }

    fn exists(&self, ns: &str, key: &str) -> bool {
        self.data.contains_key(&format!("{ns}::{key}"))
    }

    fn delete(&mut self, ns: &str, key: &str) -> Result<(), StorageError> {
        self.data.remove(&format!("{ns}::{key}"));
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let mut store = MemStore {
        data: HashMap::new(),
    };
    let mut log = FaultLog::new();
    log.init(&store);

    // Two bytes per op: [opcode, argument].
    for op in data.chunks(2) {
        let arg = op.get(1).copied().unwrap_or(0);
        match op[0] % 4 {
            0 | 1 => {
                let event = DiagEvent::PRIORITY[arg as usize % DiagEvent::PRIORITY.len()];
                let _ = log.append(&mut store, &DiagnosticsRecord::new(event, u32::from(arg)));
            }
            2 => {
                // Garbage in a slot or in the index must read back as missing.
                let key = if arg % 2 == 0 {
                    format!("diag::f{}", arg as usize % FAULT_LOG_SLOTS)
                } else {
                    "diag::f_idx".to_string()
                };
                store.data.insert(key, op.to_vec());
            }
            _ => {
                let mut restarted = FaultLog::new();
                restarted.init(&store);
                log = restarted;
            }
        }

        assert!(log.write_index() < FAULT_LOG_SLOTS);
        assert!(log.read_all(&store).len() <= FAULT_LOG_SLOTS);
        assert!(log.count(&store) <= FAULT_LOG_SLOTS);
    }

    log.clear(&mut store).expect("in-memory delete cannot fail");
    assert!(log.read_all(&store).is_empty());
    assert_eq!(log.count(&store), 0);
});
