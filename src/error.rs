//! Error trait extensions

use std::error::Error;

use tracing::{debug, error};

/// Source-walking helpers for any error, `Fail` included. A chained `Fail`
/// reports its `inner` as its source, so these see every level.
pub trait ErrorExt: Error {
    fn print_error_stack(&self) {
        eprint!("{}", self.error_stack());
    }

    fn error_stack(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = self.source();
        while let Some(cause) = source {
            output.push_str(&format!("  Caused by: {}\n", cause));
            source = cause.source();
        }
        output
    }

    fn log_error_stack(&self) {
        error!(target: "fail", error = %self, "error");

        let mut source = self.source();
        let mut depth = 1usize;
        while let Some(cause) = source {
            debug!(target: "fail", depth, cause = %cause, "caused by");
            source = cause.source();
            depth += 1;
        }
    }
}

impl<T: Error + ?Sized> ErrorExt for T {}
