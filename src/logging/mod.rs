//! Logging Module
//!
//! Emits an error chain through `tracing`: the top message at error level,
//! every deeper level at debug, and the captured stack snapshots at trace.
//! Installing a subscriber is left to the application.

use tracing::{debug, error, trace};

use crate::chain::Fail;

/// Log every level of `err`, top first.
pub fn log_chain(err: &Fail) {
    for (depth, level) in err.chain().enumerate() {
        if depth == 0 {
            error!(target: "fail", error = %level, "error");
        } else {
            debug!(target: "fail", depth, cause = %level, "caused by");
        }

        if let Some(node) = level.node() {
            trace!(
                target: "fail",
                depth,
                stack = %String::from_utf8_lossy(node.trace()),
                "captured at"
            );
        }
    }
}

/// Plain text report of a chain: the top message, then one line per cause,
/// then the stack captured at the outermost wrap point.
pub fn format_chain(err: &Fail) -> String {
    let mut output = String::new();
    for (depth, level) in err.chain().enumerate() {
        if depth == 0 {
            output.push_str(&format!("Error: {}\n", level));
        } else {
            output.push_str(&format!("  Caused by: {}\n", level));
        }
    }

    if let Some(node) = err.node() {
        output.push_str("\n=== trace ===\n");
        output.push_str(&String::from_utf8_lossy(node.trace()));
        if !output.ends_with('\n') {
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::wrap_with;
    use crate::trace::FixedTracer;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    #[test]
    fn test_format_chain() {
        let middle = wrap_with("disk full", "writing state", &FixedTracer::new("inner frames"));
        let err = wrap_with(middle, "saving project", &FixedTracer::new("outer frames"));

        assert_eq!(
            format_chain(&err),
            "Error: saving project\n  Caused by: writing state\n  Caused by: disk full\n\n=== trace ===\nouter frames\n"
        );
    }

    #[test]
    fn test_format_leaf() {
        assert_eq!(format_chain(&Fail::msg("plain")), "Error: plain\n");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_chain_levels() {
        let middle = wrap_with("disk full", "writing state", &FixedTracer::new("inner frames"));
        let err = wrap_with(middle, "saving project", &FixedTracer::new("outer frames"));

        let logs = capture_logs(|| log_chain(&err));
        let lines: Vec<&str> = logs.lines().collect();

        let top = lines.iter().find(|l| l.contains("error=saving project")).unwrap();
        assert!(top.contains("ERROR"));

        let middle = lines.iter().find(|l| l.contains("cause=writing state")).unwrap();
        assert!(middle.contains("DEBUG"));
        assert!(middle.contains("depth=1"));

        let cause = lines.iter().find(|l| l.contains("cause=disk full")).unwrap();
        assert!(cause.contains("DEBUG"));
        assert!(cause.contains("depth=2"));

        let stacks: Vec<&&str> = lines.iter().filter(|l| l.contains("TRACE")).collect();
        assert_eq!(stacks.len(), 2);
        assert!(stacks[0].contains("stack=outer frames"));
        assert!(stacks[1].contains("stack=inner frames"));
    }

    #[test]
    fn test_log_leaf_has_no_stack() {
        let logs = capture_logs(|| log_chain(&Fail::msg("plain")));
        assert!(logs.contains("error=plain"));
        assert!(!logs.contains("TRACE"));
    }
}
