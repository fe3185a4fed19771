//! Exit status codes for the CLI
//!
//! - 0: success
//! - 1: any error (bad arguments, missing configuration, failed simulated test)
//! - 130: interrupted (Ctrl+C)

use std::process::{ExitCode, Termination};

use crate::errors::HrbridgeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    /// Standard SIGINT code
    Interrupted = 130,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// A simulated test exits non-zero unless it came back 2xx
    pub fn from_simulated_status(status_code: u16) -> Self {
        if (200..300).contains(&status_code) {
            ExitStatus::Success
        } else {
            ExitStatus::Error
        }
    }

    pub fn from_error(err: &HrbridgeError) -> Self {
        match err {
            HrbridgeError::Interrupted => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_status() {
        assert_eq!(ExitStatus::from_simulated_status(200), ExitStatus::Success);
        assert_eq!(ExitStatus::from_simulated_status(400), ExitStatus::Error);
    }

    #[test]
    fn test_from_error() {
        assert_eq!(ExitStatus::from_error(&HrbridgeError::Interrupted), ExitStatus::Interrupted);
        assert_eq!(
            ExitStatus::from_error(&HrbridgeError::NotFound("9".into())),
            ExitStatus::Error
        );
    }
}
