use pegsharp_compiler::{frontend, lower};

use super::grammar_loader::{display_path, load_grammar_source};
use super::options::build_config;
use super::report::Reporter;
use crate::cli::{GrammarArgs, OptionsArgs};

/// Parse and analyze only, printing the flattened rule set the generators
/// would see. Exits non-zero on any error.
pub fn run(grammar: GrammarArgs, options: OptionsArgs) {
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

    let result = frontend::parse(&source).and_then(|(parsed, mut diagnostics)| {
        let (rules, lower_diagnostics) = lower::lower(parsed, &config)?;
        diagnostics.extend(lower_diagnostics);
        Ok((rules, diagnostics))
    });

    let (rules, diagnostics) = match result {
        Ok(result) => result,
        Err(error) => {
            reporter.emit_error(&error);
            std::process::exit(1);
        }
    };

    reporter.emit(&diagnostics);

    for rule in &rules {
        println!("{}", rule);
    }
}
