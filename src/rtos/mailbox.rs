//! Bounded FIFO mailboxes over `embassy-sync` channels.
//!
//! The channel itself is interrupt-safe (critical-section guarded); the
//! blocking calls park the calling thread via `futures_lite::block_on`.
//!
//! Three send disciplines are offered:
//!
//! | Call              | Full mailbox behaviour          |
//! |-------------------|---------------------------------|
//! | `send`            | block until a slot frees        |
//! | `try_send`        | drop the new item               |
//! | `send_overwrite`  | drop the oldest item            |

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

pub struct Mailbox<T, const N: usize> {
    channel: Channel<CriticalSectionRawMutex, T, N>,
}

impl<T, const N: usize> Default for Mailbox<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Mailbox<T, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Blocking send: waits for space (back-pressure).
    pub fn send(&self, item: T) {
        futures_lite::future::block_on(self.channel.send(item));
    }

    /// Non-blocking send. Returns `false` and drops `item` when full.
    pub fn try_send(&self, item: T) -> bool {
        self.channel.try_send(item).is_ok()
    }

    /// Non-blocking send that evicts the oldest entry when full.
    /// Returns `true` when an entry was evicted.
    pub fn send_overwrite(&self, item: T) -> bool {
        let mut item = item;
        let mut evicted = false;
        loop {
            match self.channel.try_send(item) {
                Ok(()) => return evicted,
                Err(TrySendError::Full(back)) => {
                    item = back;
                    evicted |= self.channel.try_receive().is_ok();
                }
            }
        }
    }

    /// Block until an item is available.
    pub fn recv(&self) -> T {
        futures_lite::future::block_on(self.channel.receive())
    }

    pub fn try_recv(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Block for one item, then discard everything older than the newest.
    pub fn recv_latest(&self) -> T {
        let mut latest = self.recv();
        while let Some(newer) = self.try_recv() {
            latest = newer;
        }
        latest
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn try_send_drops_when_full() {
        let m: Mailbox<u8, 2> = Mailbox::new();
        assert!(m.try_send(1));
        assert!(m.try_send(2));
        assert!(!m.try_send(3));
        assert_eq!(m.try_recv(), Some(1));
        assert_eq!(m.try_recv(), Some(2));
        assert_eq!(m.try_recv(), None);
    }

    #[test]
    fn overwrite_keeps_newest() {
        let m: Mailbox<u8, 3> = Mailbox::new();
        for i in 0..5 {
            m.send_overwrite(i);
        }
        assert_eq!(m.len(), 3);
        assert_eq!(m.recv(), 2);
        assert_eq!(m.recv_latest(), 4);
        assert!(m.is_empty());
    }

    #[test]
    fn send_blocks_until_consumer_drains() {
        let m: Arc<Mailbox<u8, 1>> = Arc::new(Mailbox::new());
        m.send(1);
        let producer = {
            let m = Arc::clone(&m);
            thread::spawn(move || m.send(2))
        };
        thread::sleep(Duration::from_millis(20));
        assert!(!producer.is_finished());
        assert_eq!(m.recv(), 1);
        producer.join().unwrap();
        assert_eq!(m.recv(), 2);
    }
}
