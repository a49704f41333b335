//! Command dispatch: bridges CLI args -> core stores -> output formatting.

pub mod campaigns;
pub mod config_cmd;
pub mod groups;
pub mod routers;
pub mod segments;
pub mod util;

use segmenta_config::Config;
use segmenta_core::Workspace;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    workspace: &Workspace,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Routers(args) => routers::handle(workspace, args, global, config).await,
        Command::Campaigns(args) => campaigns::handle(workspace, args, global, config).await,
        Command::Segments(args) => segments::handle(workspace, args, global, config).await,
        Command::Groups(args) => groups::handle(workspace, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
