//! Segment command handlers.

use tabled::Tabled;

use segmenta_config::Config;
use segmenta_core::form::SegmentForm;
use segmenta_core::view::{CampaignNames, ViewState};
use segmenta_core::{EntityId, Segment, Workspace};

use crate::cli::{GlobalOpts, SegmentFields, SegmentsArgs, SegmentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SegmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Campaign")]
    campaign: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Min Age")]
    min_age: String,
    #[tabled(rename = "Max Age")]
    max_age: String,
    #[tabled(rename = "Updated")]
    updated_at: String,
}

/// Campaign name, else the raw id, else the placeholder.
fn campaign_cell(s: &Segment, names: &CampaignNames) -> String {
    s.campaign_name(names).map_or_else(
        || {
            s.campaign_id
                .as_ref()
                .map_or_else(|| output::NONE.into(), |id| format!("#{id}"))
        },
        str::to_owned,
    )
}

fn gender_cell(s: &Segment) -> String {
    s.gender
        .as_ref()
        .map_or_else(|| output::NONE.into(), |g| g.label())
}

fn row(s: &Segment, names: &CampaignNames) -> SegmentRow {
    SegmentRow {
        id: s.id.to_string(),
        name: output::text(s.name.as_deref()),
        campaign: campaign_cell(s, names),
        group: output::text(s.group_name.as_deref()),
        gender: gender_cell(s),
        min_age: output::number(s.min_age),
        max_age: output::number(s.max_age),
        updated_at: output::timestamp(s.updated_at.as_ref()),
    }
}

fn detail(s: &Segment, names: &CampaignNames) -> String {
    output::detail_lines(&[
        ("ID", s.id.to_string()),
        ("Name", output::text(s.name.as_deref())),
        ("Campaign", campaign_cell(s, names)),
        ("Group", output::text(s.group_name.as_deref())),
        ("Gender", gender_cell(s)),
        ("Min age", output::number(s.min_age)),
        ("Max age", output::number(s.max_age)),
        ("Created", output::timestamp(s.created_at.as_ref())),
        ("Updated", output::timestamp(s.updated_at.as_ref())),
    ])
}

fn print_segment(
    global: &GlobalOpts,
    segment: &Segment,
    names: &CampaignNames,
) -> Result<(), CliError> {
    let out = output::render_single(
        global.output(),
        segment,
        |s| detail(s, names),
        |s| s.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Campaign names for display. A failed campaign fetch only costs the
/// names, not the command.
async fn campaign_names(workspace: &Workspace) -> CampaignNames {
    if let Err(err) = workspace.campaigns.fetch_all().await {
        tracing::warn!(error = %err, "campaign names unavailable");
    }
    workspace.campaign_names()
}

fn fill(form: &mut SegmentForm, fields: SegmentFields) {
    util::overlay(&mut form.name, fields.name);
    util::overlay(&mut form.campaign_id, fields.campaign_id);
    util::overlay(&mut form.group_name, fields.group_name);
    util::overlay(&mut form.gender, fields.gender);
    util::overlay(&mut form.min_age, fields.min_age);
    util::overlay(&mut form.max_age, fields.max_age);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: SegmentsArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    let store = &workspace.segments;
    match args.command {
        SegmentsCommand::List { view, field, sort } => {
            let (segments, names) = tokio::join!(store.fetch_all(), campaign_names(workspace));
            let segments = segments?;
            let mut state = ViewState::segments(util::page_size(&view, config));
            util::configure_view(&mut state, &view, field, sort);
            let page = state.apply(segments.iter(), &names);
            output::print_page(
                global,
                &page,
                "segments",
                |s| row(s, &names),
                |s| s.id.to_string(),
            )
        }

        SegmentsCommand::Get { id } => {
            let id = EntityId::from(id);
            let (segment, names) = tokio::join!(
                util::fetch_one(store, "segment", &id),
                campaign_names(workspace)
            );
            print_segment(global, &segment?, &names)
        }

        SegmentsCommand::Create(fields) => {
            let mut form = SegmentForm::default();
            fill(&mut form, fields);
            let payload = form.validate()?;
            let created = store.create(&payload).await?;
            output::success(global, &format!("Segment {} created", created.id));
            print_segment(global, &created, &campaign_names(workspace).await)
        }

        SegmentsCommand::Update { id, fields } => {
            let id = EntityId::from(id);
            let current = util::fetch_one(store, "segment", &id).await?;
            let mut form = SegmentForm::from_segment(&current);
            fill(&mut form, fields);
            let patch = form.validate_patch()?;
            let updated = store
                .update(&id, &patch)
                .await
                .map_err(|e| util::not_found_as(e, "segment", &id))?
                .ok_or_else(|| CliError::not_found("segment", id.to_string()))?;
            output::success(global, &format!("Segment {id} updated"));
            print_segment(global, &updated, &campaign_names(workspace).await)
        }

        SegmentsCommand::Delete { id } => {
            let id = EntityId::from(id);
            if !util::confirm(&format!("Delete segment {id}?"), "segments delete", global.yes)? {
                return Ok(());
            }
            store
                .delete(&id)
                .await
                .map_err(|e| util::not_found_as(e, "segment", &id))?;
            output::success(global, &format!("Segment {id} deleted"));
            Ok(())
        }
    }
}
