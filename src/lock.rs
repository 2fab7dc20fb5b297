//! Advisory locking.

use std::io;

use crate::capability::Capability;
use crate::error::{Result, StreamError};
use crate::stream::Stream;

/// What a lock call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Exclusive,
    Shared,
    Unlock,
}

/// A lock mode plus whether the call may wait for contending holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRequest {
    pub mode: LockMode,
    pub blocking: bool,
}

impl LockRequest {
    pub const fn new(mode: LockMode, blocking: bool) -> Self {
        Self { mode, blocking }
    }

    pub const fn exclusive() -> Self {
        Self::new(LockMode::Exclusive, true)
    }

    pub const fn shared() -> Self {
        Self::new(LockMode::Shared, true)
    }

    pub const fn unlock() -> Self {
        Self::new(LockMode::Unlock, true)
    }

    /// Fail immediately instead of waiting on contention.
    pub const fn non_blocking(mut self) -> Self {
        self.blocking = false;
        self
    }

    /// The `flock(2)` operation word for this request.
    pub fn operation(&self) -> libc::c_int {
        let base = match self.mode {
            LockMode::Exclusive => libc::LOCK_EX,
            LockMode::Shared => libc::LOCK_SH,
            LockMode::Unlock => libc::LOCK_UN,
        };
        if self.blocking {
            base
        } else {
            base | libc::LOCK_NB
        }
    }
}

/// Whether a failed lock call lost to another holder rather than failing outright.
pub(crate) fn is_contention(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
}

impl Stream {
    /// Apply an advisory lock request.
    ///
    /// On failure the `Runtime` error reports `would_block() == true` when a
    /// non-blocking request hit contention.
    pub fn lock(&mut self, request: LockRequest) -> Result<()> {
        self.require(Capability::Lockable, "lock")?;
        let open = self.open_mut("lock")?;
        open.handle
            .flock(request.operation())
            .map_err(|err| StreamError::Runtime {
                message: format!("unable to apply {:?} lock: {err}", request.mode),
                would_block: is_contention(&err),
                source: Some(Box::new(err)),
            })
    }

    /// Take an exclusive lock, optionally without waiting.
    pub fn lock_exclusive(&mut self, non_blocking: bool) -> Result<()> {
        self.lock(with_blocking(LockRequest::exclusive(), non_blocking))
    }

    /// Take a shared lock, optionally without waiting.
    pub fn lock_shared(&mut self, non_blocking: bool) -> Result<()> {
        self.lock(with_blocking(LockRequest::shared(), non_blocking))
    }

    /// Release any lock held through this stream.
    pub fn unlock(&mut self) -> Result<()> {
        self.lock(LockRequest::unlock())
    }
}

fn with_blocking(request: LockRequest, non_blocking: bool) -> LockRequest {
    if non_blocking {
        request.non_blocking()
    } else {
        request
    }
}
