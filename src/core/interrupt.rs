//! Per-thread interrupt status
//!
//! Blocking reads that are cut short report an interruption. Code that
//! handles such an interruption without propagating it must call
//! [`interrupt_current`] so the caller can still observe it.

use std::cell::Cell;

thread_local! {
    static INTERRUPTED: Cell<bool> = const { Cell::new(false) };
}

/// Mark the current thread as interrupted
pub fn interrupt_current() {
    INTERRUPTED.with(|flag| flag.set(true));
}

/// Check the current thread's interrupt status without clearing it
pub fn is_interrupted() -> bool {
    INTERRUPTED.with(Cell::get)
}

/// Read and clear the current thread's interrupt status
pub fn take_interrupted() -> bool {
    INTERRUPTED.with(|flag| flag.replace(false))
}

/// Returns true if the IO error describes a cut-short blocking operation
pub fn is_interruption(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::Interrupted | std::io::ErrorKind::TimedOut
    )
}
