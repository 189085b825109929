use std::cell::RefCell;

/// Sink for recoverable parse anomalies.
///
/// The segmenter and parser never own a log level or abort on bad input;
/// every anomaly is reported here and the offending unit is skipped. The
/// binary wires in [`LogDiagnostics`]; tests use [`CollectingDiagnostics`]
/// to observe exactly which warnings were emitted.
pub trait Diagnostics {
    fn warning(&self, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warning(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Accumulates warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    warnings: RefCell<Vec<String>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
