use std::fs;
use std::path::Path;

use pegsharp_compiler::Config;

use crate::cli::OptionsArgs;

/// Assemble the compilation config: the JSON options file (if any) supplies
/// the base, individual flags override its fields.
pub fn build_config(args: &OptionsArgs) -> Result<Config, String> {
    let mut config = match &args.options {
        Some(path) => load_options_file(path)?,
        None => Config::new(),
    };

    if args.no_discard_literals {
        config = config.discard_literals(false);
    }
    for name in &args.discard_named {
        config = config.discard_named(name.as_str());
    }
    if let Some(prefix) = &args.discard_prefix {
        config = config.discard_prefix(prefix.as_str());
    }
    if let Some(path) = &args.preamble {
        config = config.preamble(load_text(path)?);
    }
    if let Some(path) = &args.postamble {
        config = config.postamble(load_text(path)?);
    }
    Ok(config)
}

fn load_options_file(path: &Path) -> Result<Config, String> {
    let content = load_text(path)?;
    serde_json::from_str(&content)
        .map_err(|e| format!("invalid options file '{}': {}", path.display(), e))
}

fn load_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
