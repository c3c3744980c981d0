//! Async-signal-safe emission of the current best decomposition on
//! `SIGINT`/`SIGTERM`, grounded on `pace.cpp`'s `signal_handler` /
//! `test_new_elimination_order` critical section, translated from raw
//! `new char[]`/`delete[]` into `Box::into_raw`/`Box::from_raw` pairs.

use std::ffi::CString;
use std::sync::atomic::{AtomicPtr, AtomicU32, Ordering};
use std::sync::Mutex;

/// `None` until the first decomposition is installed.
static BEST_DECOMPOSITION: AtomicPtr<i8> = AtomicPtr::new(std::ptr::null_mut());
static BEST_DEPTH: AtomicU32 = AtomicU32::new(u32::MAX);
static UPDATE_LOCK: Mutex<()> = Mutex::new(());

/// Whether printing a notice when no decomposition exists yet is enabled;
/// set once at startup from the `--status` flag.
static PRINT_STATUS_NOTICE: AtomicU32 = AtomicU32::new(0);

pub fn set_print_status_notice(enabled: bool) {
    PRINT_STATUS_NOTICE.store(enabled as u32, Ordering::Relaxed);
}

/// The depth currently installed, or `None` if nothing has been installed
/// yet. Workers use this as a cheap pre-check before formatting a
/// candidate and entering the critical section.
pub fn best_depth() -> Option<u32> {
    let d = BEST_DEPTH.load(Ordering::SeqCst);
    if d == u32::MAX {
        None
    } else {
        Some(d)
    }
}

/// Install `decomposition` as the new best if `depth` is still strictly
/// smaller than the shared best at the moment the critical section is
/// entered (another worker may have won the race while this one
/// formatted its candidate). Returns whether it was installed.
pub fn install_if_better(depth: u32, decomposition: &str) -> bool {
    if let Some(current) = best_depth() {
        if depth >= current {
            return false;
        }
    }

    let leaked = CString::new(decomposition).expect("decomposition text must not contain NUL bytes").into_raw();

    let _guard = UPDATE_LOCK.lock().unwrap();
    if let Some(current) = best_depth() {
        if depth >= current {
            unsafe {
                drop(CString::from_raw(leaked));
            }
            return false;
        }
    }

    let previous = BEST_DECOMPOSITION.swap(leaked, Ordering::SeqCst);
    BEST_DEPTH.store(depth, Ordering::SeqCst);
    if !previous.is_null() {
        unsafe {
            drop(CString::from_raw(previous));
        }
    }
    true
}

/// Register `SIGINT`/`SIGTERM` to call `emit_best_and_exit`.
pub fn install_handlers() {
    unsafe {
        libc::signal(libc::SIGINT, emit_best_and_exit as libc::sighandler_t);
        libc::signal(libc::SIGTERM, emit_best_and_exit as libc::sighandler_t);
    }
}

const NO_DECOMPOSITION_MESSAGE: &[u8] = b"no decomposition computed before interruption\n";

/// Async-signal-safe: no allocation, no lock acquisition, only a raw
/// `write` syscall and `_exit`.
extern "C" fn emit_best_and_exit(_signum: libc::c_int) {
    let ptr = BEST_DECOMPOSITION.load(Ordering::SeqCst);
    unsafe {
        if !ptr.is_null() {
            let len = libc::strlen(ptr);
            libc::write(libc::STDOUT_FILENO, ptr as *const libc::c_void, len);
        } else if PRINT_STATUS_NOTICE.load(Ordering::Relaxed) != 0 {
            libc::write(
                libc::STDOUT_FILENO,
                NO_DECOMPOSITION_MESSAGE.as_ptr() as *const libc::c_void,
                NO_DECOMPOSITION_MESSAGE.len(),
            );
        }
        libc::_exit(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_rejects_non_improving_depth() {
        assert!(install_if_better(5, "5\n0\n"));
        assert_eq!(best_depth(), Some(5));
        assert!(!install_if_better(5, "5\n0\n"));
        assert!(!install_if_better(6, "6\n0\n"));
        assert!(install_if_better(3, "3\n0\n"));
        assert_eq!(best_depth(), Some(3));
    }
}
