use std::io;
use std::process;

use crate::error::Error;

/// Standard Unix exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidUsage = 2,
    SignalPipe = 141, // 128 + SIGPIPE (13)
}

impl ExitCode {
    pub fn exit(self) -> ! {
        process::exit(self as i32)
    }

    /// Exit code for a failed run, looking through anyhow context layers
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(Error::Persist { source, .. }) = cause.downcast_ref::<Error>() {
                if is_broken_pipe(source) {
                    return ExitCode::SignalPipe;
                }
            }
        }
        ExitCode::GeneralError
    }
}

/// Cross-platform broken pipe detection
pub fn is_broken_pipe(e: &io::Error) -> bool {
    #[cfg(unix)]
    {
        e.kind() == io::ErrorKind::BrokenPipe
    }
    #[cfg(windows)]
    {
        // On Windows, broken pipe manifests as different error codes
        e.kind() == io::ErrorKind::BrokenPipe
            || e.raw_os_error() == Some(232) // ERROR_NO_DATA "The pipe is being closed"
            || e.raw_os_error() == Some(109) // ERROR_BROKEN_PIPE "The pipe has been ended"
    }
    #[cfg(not(any(unix, windows)))]
    {
        e.kind() == io::ErrorKind::BrokenPipe
    }
}
