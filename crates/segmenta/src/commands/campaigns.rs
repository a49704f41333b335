//! Campaign command handlers.

use tabled::Tabled;

use segmenta_config::Config;
use segmenta_core::form::CampaignForm;
use segmenta_core::view::{ViewState, campaign_view};
use segmenta_core::{Campaign, EntityId, Workspace};

use crate::cli::{CampaignsArgs, CampaignsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CampaignRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

fn status(c: &Campaign) -> &'static str {
    if c.is_active() { "active" } else { "inactive" }
}

fn row(c: &Campaign) -> CampaignRow {
    CampaignRow {
        id: c.id.to_string(),
        name: output::text(c.name.as_deref()),
        status: status(c),
        url: output::text(c.url.as_deref()),
        created_at: output::timestamp(c.created_at.as_ref()),
    }
}

fn detail(c: &Campaign) -> String {
    output::detail_lines(&[
        ("ID", c.id.to_string()),
        ("Name", output::text(c.name.as_deref())),
        ("Description", output::text(c.description.as_deref())),
        ("URL", output::text(c.url.as_deref())),
        ("Status", status(c).into()),
        ("Created", output::timestamp(c.created_at.as_ref())),
        ("Updated", output::timestamp(c.updated_at.as_ref())),
    ])
}

fn print_campaign(global: &GlobalOpts, campaign: &Campaign) -> Result<(), CliError> {
    let out = output::render_single(global.output(), campaign, detail, |c| c.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: CampaignsArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    let store = &workspace.campaigns;
    match args.command {
        CampaignsCommand::List {
            view,
            field,
            status,
            sort,
        } => {
            let snapshot = store.fetch_all().await?;
            let mut state = ViewState::campaigns(util::page_size(&view, config));
            util::configure_view(&mut state, &view, field, sort);
            let page = campaign_view(&snapshot, status, &mut state);
            output::print_page(global, &page, "campaigns", row, |c| c.id.to_string())
        }

        CampaignsCommand::Get { id } => {
            let campaign = util::fetch_one(store, "campaign", &EntityId::from(id)).await?;
            print_campaign(global, &campaign)
        }

        CampaignsCommand::Create {
            name,
            description,
            url,
            inactive,
        } => {
            let form = CampaignForm {
                name: name.unwrap_or_default(),
                description: description.unwrap_or_default(),
                url: url.unwrap_or_default(),
                active: !inactive,
            };
            let payload = form.validate()?;
            let created = store.create(&payload).await?;
            output::success(global, &format!("Campaign {} created", created.id));
            print_campaign(global, &created)
        }

        CampaignsCommand::Update {
            id,
            name,
            description,
            url,
            active,
        } => {
            let id = EntityId::from(id);
            let current = util::fetch_one(store, "campaign", &id).await?;
            let mut form = CampaignForm::from_campaign(&current);
            util::overlay(&mut form.name, name);
            util::overlay(&mut form.description, description);
            util::overlay(&mut form.url, url);
            if let Some(active) = active {
                form.active = active;
            }
            let patch = form.validate_patch()?;
            let updated = store
                .update(&id, &patch)
                .await
                .map_err(|e| util::not_found_as(e, "campaign", &id))?
                .ok_or_else(|| CliError::not_found("campaign", id.to_string()))?;
            output::success(global, &format!("Campaign {id} updated"));
            print_campaign(global, &updated)
        }

        CampaignsCommand::Delete { id } => {
            let id = EntityId::from(id);
            if !util::confirm(
                &format!("Delete campaign {id}?"),
                "campaigns delete",
                global.yes,
            )? {
                return Ok(());
            }
            store
                .delete(&id)
                .await
                .map_err(|e| util::not_found_as(e, "campaign", &id))?;
            output::success(global, &format!("Campaign {id} deleted"));
            Ok(())
        }
    }
}
