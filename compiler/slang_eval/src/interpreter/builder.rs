//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::{stdout_handler, Environment, NativeRegistry, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// By default the interpreter prints to stdout, installs the standard
/// built-ins and allows [`DEFAULT_MAX_CALL_DEPTH`] nested calls.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
    natives: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            natives: true,
        }
    }

    /// Where `print` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Nested user-function calls allowed before `RecursionLimitExceeded`.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Whether to install the standard built-ins into the global scope.
    #[must_use]
    pub fn natives(mut self, enabled: bool) -> Self {
        self.natives = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let global = Environment::global();
        if self.natives {
            NativeRegistry::with_defaults(print_handler.clone()).install(&global);
        }
        Interpreter {
            global,
            print_handler,
            max_call_depth: self.max_call_depth,
            call_depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
