//! Group command handlers.

use segmenta_core::Workspace;
use segmenta_core::view::distinct_groups;

use crate::cli::{GlobalOpts, GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output;

#[derive(tabled::Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    group: String,
}

pub async fn handle(
    workspace: &Workspace,
    args: GroupsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GroupsCommand::List => {
            let groups = match workspace.fetch_groups().await {
                Ok(groups) => groups,
                Err(err) => {
                    // No groups endpoint: infer from the router inventory.
                    tracing::warn!(error = %err, "groups endpoint failed, inferring from routers");
                    let routers = workspace.routers.fetch_all().await?;
                    distinct_groups(routers.iter()).into_iter().collect()
                }
            };
            let out = output::render_list(
                global.output(),
                &groups,
                |g| GroupRow { group: g.clone() },
                Clone::clone,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
