//! Router command handlers.

use serde::Serialize;
use tabled::Tabled;

use segmenta_config::Config;
use segmenta_core::form::RouterForm;
use segmenta_core::view::{ViewState, group_counts};
use segmenta_core::{EntityId, Router, Workspace};

use crate::cli::{GlobalOpts, RouterFields, RoutersArgs, RoutersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RouterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Device")]
    device_name: String,
    #[tabled(rename = "Estación")]
    estacion: String,
    #[tabled(rename = "Municipio")]
    municipio: String,
    #[tabled(rename = "Lat")]
    latitud: String,
    #[tabled(rename = "Long")]
    longitud: String,
    #[tabled(rename = "Group")]
    group: String,
}

fn row(r: &Router) -> RouterRow {
    RouterRow {
        id: r.id.to_string(),
        serial: output::text(r.serial.as_deref()),
        mac: output::text(r.mac.as_deref()),
        device_name: output::text(r.device_name.as_deref()),
        estacion: output::text(r.estacion.as_deref()),
        municipio: output::text(r.municipio.as_deref()),
        latitud: output::number(r.latitud),
        longitud: output::number(r.longitud),
        group: output::text(r.group()),
    }
}

#[derive(Clone, Serialize, Tabled)]
struct GroupCount {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Routers")]
    routers: usize,
}

fn detail(r: &Router) -> String {
    output::detail_lines(&[
        ("ID", r.id.to_string()),
        ("Serial", output::text(r.serial.as_deref())),
        ("MAC", output::text(r.mac.as_deref())),
        ("Device", output::text(r.device_name.as_deref())),
        ("Estación", output::text(r.estacion.as_deref())),
        ("Municipio", output::text(r.municipio.as_deref())),
        ("Latitud", output::number(r.latitud)),
        ("Longitud", output::number(r.longitud)),
        ("Group", output::text(r.group())),
    ])
}

fn print_router(global: &GlobalOpts, router: &Router) -> Result<(), CliError> {
    let out = output::render_single(global.output(), router, detail, |r| r.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Overlay the given flags onto `form`.
fn fill(form: &mut RouterForm, fields: RouterFields) {
    util::overlay(&mut form.serial, fields.serial);
    util::overlay(&mut form.mac, fields.mac);
    util::overlay(&mut form.device_name, fields.device_name);
    util::overlay(&mut form.estacion, fields.estacion);
    util::overlay(&mut form.municipio, fields.municipio);
    util::overlay(&mut form.latitud, fields.latitud);
    util::overlay(&mut form.longitud, fields.longitud);
    util::overlay(&mut form.group_name, fields.group_name);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: RoutersArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    let store = &workspace.routers;
    match args.command {
        RoutersCommand::List { view, field, sort } => {
            let snapshot = store.fetch_all().await?;
            let mut state = ViewState::new(util::page_size(&view, config));
            util::configure_view(&mut state, &view, field, sort);
            let page = state.apply(snapshot.iter(), &());
            output::print_page(global, &page, "routers", row, |r| r.id.to_string())
        }

        RoutersCommand::Get { id } => {
            let router = util::fetch_one(store, "router", &EntityId::from(id)).await?;
            print_router(global, &router)
        }

        RoutersCommand::Create(fields) => {
            let mut form = RouterForm::default();
            fill(&mut form, fields);
            let payload = form.validate()?;
            let created = store.create(&payload).await?;
            output::success(global, &format!("Router {} created", created.id));
            print_router(global, &created)
        }

        RoutersCommand::Update { id, fields } => {
            let id = EntityId::from(id);
            let current = util::fetch_one(store, "router", &id).await?;
            let mut form = RouterForm::from_router(&current);
            fill(&mut form, fields);
            let patch = form.validate_patch()?;
            let updated = store
                .update(&id, &patch)
                .await
                .map_err(|e| util::not_found_as(e, "router", &id))?
                .ok_or_else(|| CliError::not_found("router", id.to_string()))?;
            output::success(global, &format!("Router {id} updated"));
            print_router(global, &updated)
        }

        RoutersCommand::SetGroup { id, group } => {
            let id = EntityId::from(id);
            util::fetch_one(store, "router", &id).await?;
            let updated = store
                .set_group(&id, group.trim())
                .await
                .map_err(|e| util::not_found_as(e, "router", &id))?
                .ok_or_else(|| CliError::not_found("router", id.to_string()))?;
            output::success(
                global,
                &format!("Router {id} moved to {}", updated.group().unwrap_or("no group")),
            );
            Ok(())
        }

        RoutersCommand::Delete { id } => {
            let id = EntityId::from(id);
            if !util::confirm(&format!("Delete router {id}?"), "routers delete", global.yes)? {
                return Ok(());
            }
            store
                .delete(&id)
                .await
                .map_err(|e| util::not_found_as(e, "router", &id))?;
            output::success(global, &format!("Router {id} deleted"));
            Ok(())
        }

        RoutersCommand::Groups => {
            let snapshot = store.fetch_all().await?;
            let counts: Vec<GroupCount> = group_counts(snapshot.iter())
                .into_iter()
                .map(|(group, routers)| GroupCount { group, routers })
                .collect();
            let out = output::render_list(global.output(), &counts, Clone::clone, |g| {
                g.group.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
