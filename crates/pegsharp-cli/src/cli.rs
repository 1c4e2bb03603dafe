use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[derive(Parser)]
#[command(name = "pegsharp", bin_name = "pegsharp")]
#[command(about = "Compile PEG grammars to typed F# parsers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a grammar to an F# source document
    #[command(after_help = r#"EXAMPLES:
  pegsharp compile -g 'digit = [0-9]'
  pegsharp compile --grammar-file lang.peg -o Parser.fs
  pegsharp compile --grammar-file - --discard-named ws,comment
  pegsharp compile --grammar-file lang.peg --options pegsharp.json"#)]
    Compile {
        #[command(flatten)]
        grammar: GrammarArgs,

        /// Write output here instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: OptionsArgs,
    },

    /// Parse and analyze a grammar, printing the flattened rules
    #[command(after_help = r#"EXAMPLES:
  pegsharp check -g 'digit = [0-9]'
  pegsharp check --grammar-file lang.peg"#)]
    Check {
        #[command(flatten)]
        grammar: GrammarArgs,

        #[command(flatten)]
        options: OptionsArgs,
    },
}

#[derive(Args)]
#[group(id = "grammar_input", multiple = false)]
pub struct GrammarArgs {
    /// Grammar as inline text
    #[arg(short = 'g', long = "grammar", value_name = "GRAMMAR")]
    pub grammar_text: Option<String>,

    /// Grammar from file (use "-" for stdin)
    #[arg(long = "grammar-file", value_name = "FILE")]
    pub grammar_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct OptionsArgs {
    /// Colorize diagnostics output
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorChoice,

    /// Options as JSON file; flags below override its fields
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Keep literal matches in the emitted shapes
    #[arg(long = "no-discard-literals")]
    pub no_discard_literals: bool,

    /// Rule names to treat as silent (comma-separated)
    #[arg(long = "discard-named", value_name = "NAMES", value_delimiter = ',')]
    pub discard_named: Vec<String>,

    /// Silent-rule name prefix
    #[arg(long = "discard-prefix", value_name = "PREFIX")]
    pub discard_prefix: Option<String>,

    /// Replace the built-in F# preamble with this file's contents
    #[arg(long, value_name = "FILE")]
    pub preamble: Option<PathBuf>,

    /// Replace the built-in F# postamble with this file's contents
    #[arg(long, value_name = "FILE")]
    pub postamble: Option<PathBuf>,
}
