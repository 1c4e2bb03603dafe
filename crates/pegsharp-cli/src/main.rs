mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            grammar,
            output,
            options,
        } => commands::compile::run(grammar, output, options),
        Command::Check { grammar, options } => commands::check::run(grammar, options),
    }
}
