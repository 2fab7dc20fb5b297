//! Thin wrappers over the libc calls std does not expose.

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};

fn cvt(ret: libc::c_int) -> io::Result<libc::c_int> {
    if ret == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret)
    }
}

/// File status flags (`F_GETFL`). Fails with `EBADF` on a closed descriptor.
pub(crate) fn status_flags(fd: BorrowedFd<'_>) -> io::Result<libc::c_int> {
    // SAFETY: F_GETFL takes no pointer argument and the descriptor is borrowed.
    cvt(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_GETFL) })
}

pub(crate) fn set_nonblocking(fd: BorrowedFd<'_>, nonblocking: bool) -> io::Result<()> {
    let flags = status_flags(fd)?;
    let updated = if nonblocking {
        flags | libc::O_NONBLOCK
    } else {
        flags & !libc::O_NONBLOCK
    };
    if updated != flags {
        // SAFETY: F_SETFL takes an integer argument.
        cvt(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFL, updated) })?;
    }
    Ok(())
}

/// Mode string equivalent to a set of status flags.
pub(crate) fn mode_from_flags(flags: libc::c_int) -> Option<&'static str> {
    let append = flags & libc::O_APPEND != 0;
    match flags & libc::O_ACCMODE {
        libc::O_RDONLY => Some("r"),
        libc::O_WRONLY if append => Some("a"),
        libc::O_WRONLY => Some("w"),
        libc::O_RDWR if append => Some("a+"),
        libc::O_RDWR => Some("r+"),
        _ => None,
    }
}

/// `flock(2)`, retried on `EINTR`.
pub(crate) fn flock(fd: BorrowedFd<'_>, operation: libc::c_int) -> io::Result<()> {
    loop {
        // SAFETY: flock only reads the descriptor and the operation flags.
        match cvt(unsafe { libc::flock(fd.as_raw_fd(), operation) }) {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
