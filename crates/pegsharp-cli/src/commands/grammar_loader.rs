use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::GrammarArgs;

/// The path to report diagnostics against, when the grammar came from a file.
pub fn display_path(args: &GrammarArgs) -> Option<String> {
    args.grammar_file
        .as_ref()
        .filter(|path| path.as_os_str() != "-")
        .map(|path| path.display().to_string())
}

pub fn load_grammar_source(args: &GrammarArgs) -> Result<String, String> {
    if let Some(text) = &args.grammar_text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.grammar_file {
        if path.as_os_str() == "-" {
            return load_stdin();
        }
        return load_file(path);
    }

    Err("grammar is required: use -g/--grammar or --grammar-file".to_string())
}

fn load_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}

fn load_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
