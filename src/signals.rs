//! Ctrl+C handling
//!
//! The handler only raises a flag; long-running loops such as the
//! interactive wizard poll it between prompts.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{HrbridgeError, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn was_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Called from the signal handler
#[inline]
pub fn set_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

#[inline]
pub fn reset_interrupted() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Bail out of a loop once Ctrl+C was pressed
pub fn check_interrupted() -> Result<()> {
    if was_interrupted() {
        Err(HrbridgeError::Interrupted)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_flag() {
        reset_interrupted();
        assert!(!was_interrupted());
        assert!(check_interrupted().is_ok());

        set_interrupted();
        assert!(matches!(check_interrupted(), Err(HrbridgeError::Interrupted)));

        reset_interrupted();
        assert!(!was_interrupted());
    }
}
