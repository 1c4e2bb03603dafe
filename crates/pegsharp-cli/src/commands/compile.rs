use std::fs;
use std::path::PathBuf;

use super::grammar_loader::{display_path, load_grammar_source};
use super::options::build_config;
use super::report::Reporter;
use crate::cli::{GrammarArgs, OptionsArgs};

pub fn run(grammar: GrammarArgs, output: Option<PathBuf>, options: OptionsArgs) {
    let path = display_path(&grammar);
    let source = load_grammar_source(&grammar).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let config = build_config(&options).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let reporter = Reporter::new(&source, path.as_deref(), options.color.should_colorize());

    let (document, diagnostics) = match pegsharp_compiler::compile(&source, &config) {
        Ok(result) => result,
        Err(error) => {
            reporter.emit_error(&error);
            std::process::exit(1);
        }
    };

    reporter.emit(&diagnostics);

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &document) {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", document),
    }
}
