use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

/// Completion script for `shell`, named after the binary.
pub fn render_completions(shell: CompletionShell) -> Vec<u8> {
    let mut command = Cli::command();
    let binary = command.get_name().to_string();
    let mut script = Vec::new();
    generate(Shell::from(shell), &mut command, binary, &mut script);
    script
}

pub async fn run_completions(
    shell: CompletionShell,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let script = render_completions(shell);

    match output_path {
        Some(path) => {
            tokio::fs::write(path, &script).await?;
            println!("{}", path.display());
        }
        None => io::stdout().write_all(&script)?,
    }

    Ok(())
}
