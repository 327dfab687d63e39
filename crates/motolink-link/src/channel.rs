use std::sync::{Arc, Mutex, MutexGuard};

use motolink_transport::ByteChannel;

use crate::error::{LinkError, Result};

/// A byte channel shared by every link handle on one physical bus.
///
/// The mutex is held for a whole request/response exchange, so handles
/// derived for other nodes never interleave their packets.
#[derive(Clone)]
pub struct SharedChannel {
    inner: Arc<Mutex<Box<dyn ByteChannel>>>,
}

impl SharedChannel {
    /// Take ownership of an open channel.
    pub fn new(channel: impl ByteChannel + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(channel))),
        }
    }

    /// Lock the channel for one exchange.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Box<dyn ByteChannel>>> {
        self.inner
            .lock()
            .map_err(|_| LinkError::ReadFault("channel lock poisoned".to_string()))
    }

    /// Number of link handles referencing this channel.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl std::fmt::Debug for SharedChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedChannel")
            .field("handles", &self.handle_count())
            .finish()
    }
}
