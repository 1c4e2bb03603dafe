//! Diagnostic reporting to stderr.

use pegsharp_compiler::{Diagnostics, Error};

pub struct Reporter<'a> {
    source: &'a str,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(source: &'a str, path: Option<&'a str>, colored: bool) -> Self {
        Self {
            source,
            path,
            colored,
        }
    }

    pub fn emit(&self, diagnostics: &Diagnostics) {
        if diagnostics.is_empty() {
            return;
        }
        let mut printer = diagnostics
            .printer()
            .source(self.source)
            .colored(self.colored);
        if let Some(path) = self.path {
            printer = printer.path(path);
        }
        eprintln!("{}", printer.render());
    }

    pub fn emit_error(&self, error: &Error) {
        match error.diagnostics() {
            Some(diagnostics) => self.emit(diagnostics),
            None => eprintln!("error: {}", error),
        }
    }
}
