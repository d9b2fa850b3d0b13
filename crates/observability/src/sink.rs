use tracelens_core::LogSink;

/// Target every summary line is emitted under.
pub const SUMMARY_TARGET: &str = "tracelens::summary";

/// Forwards summary lines to the process-wide `tracing` subscriber.
///
/// Used when the filter runs outside a proxy (replay tools, local runs); inside a
/// proxy the host's own log emitter implements [`LogSink`] instead.
#[derive(Debug, Copy, Clone, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn info(&self, line: &str) {
        ::tracing::info!(target: SUMMARY_TARGET, "{line}");
    }

    fn warn(&self, line: &str) {
        ::tracing::warn!(target: SUMMARY_TARGET, "{line}");
    }

    fn error(&self, line: &str) {
        ::tracing::error!(target: SUMMARY_TARGET, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracelens_core::EmitLevel;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn lines_are_forwarded_verbatim_at_each_level() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(::tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish();

        let line = "[Response NO_ID/T/NO_ID/NO_ID] [Status] 200";
        ::tracing::subscriber::with_default(subscriber, || {
            let sink = TracingLogSink;
            sink.emit(EmitLevel::Info, line);
            sink.emit(EmitLevel::Warn, line);
            sink.error("cannot get res body");
        });

        let out = captured.contents();
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("INFO") && rows[0].ends_with(line));
        assert!(rows[1].contains("WARN") && rows[1].ends_with(line));
        assert!(rows[2].contains("ERROR") && rows[2].contains(SUMMARY_TARGET));
    }
}
