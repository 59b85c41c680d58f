use crate::cli::args::{Cli, CompletionCommands};
use crate::utils::errors::Result;
use clap::CommandFactory;
use clap_complete::generate;
use std::io;

const APP_NAME: &str = "credhub-rs";

pub fn handle_completion_command(command: &CompletionCommands) -> Result<()> {
    let mut cmd = Cli::command();
    generate(command.shell(), &mut cmd, APP_NAME, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completion_mentions_subcommands() {
        let mut cmd = Cli::command();
        let mut buffer = Vec::new();
        generate(
            CompletionCommands::Bash.shell(),
            &mut cmd,
            APP_NAME,
            &mut buffer,
        );

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("interpolate"));
        assert!(script.contains("get-id"));
    }
}
