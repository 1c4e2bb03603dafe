pub mod check;
pub mod compile;

mod grammar_loader;
mod options;
mod report;
