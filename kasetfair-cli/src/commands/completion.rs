use clap::CommandFactory;
use clap_complete::{generate, shells::Shell};
use std::io;

/// Writes the completion script for `kasetfair` to stdout, e.g.
/// `kasetfair completion --shell zsh > _kasetfair`.
pub fn generate_completion(shell: Shell) {
    let mut command = crate::Cli::command();
    generate(shell, &mut command, "kasetfair", &mut io::stdout());
}
