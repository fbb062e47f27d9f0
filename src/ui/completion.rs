//! Shell completion generation

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::ui::cli::Cli;

/// Write the completion script for `shell` to `out`
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, out);
}

/// Print the completion script for `shell` to stdout
pub fn print_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}
