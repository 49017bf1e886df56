//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name as typed on the command line (e.g. "side-dishes").
pub fn command_name(command: &Commands) -> &'static str {
    command.content_command().name()
}
