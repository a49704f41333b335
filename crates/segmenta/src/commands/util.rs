//! Shared helpers for command handlers.

use std::io::IsTerminal;

use segmenta_config::Config;
use segmenta_core::view::{SearchScope, SortState, ViewState};
use segmenta_core::{CoreError, EntityId, EntityStore, Resource};

use crate::cli::ViewArgs;
use crate::config;
use crate::error::CliError;

/// Look up `id` in a freshly fetched store.
pub async fn fetch_one<T: Resource>(
    store: &EntityStore<T>,
    resource_type: &str,
    id: &EntityId,
) -> Result<T, CliError> {
    store.fetch_all().await?;
    store
        .get(id)
        .ok_or_else(|| CliError::not_found(resource_type, id.to_string()))
}

/// Name the resource in a backend 404.
pub fn not_found_as(err: CoreError, resource_type: &str, id: &EntityId) -> CliError {
    match err {
        CoreError::NotFound { .. } => CliError::not_found(resource_type, id.to_string()),
        other => other.into(),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to ask, so `--yes` is
/// required.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Overlay a flag onto a prefilled form field.
pub fn overlay(field: &mut String, flag: Option<String>) {
    if let Some(value) = flag {
        *field = value;
    }
}

/// Rows per page for a list command; `--all` shows everything at once.
pub fn page_size(view: &ViewArgs, config: &Config) -> usize {
    if view.all {
        usize::MAX
    } else {
        config::page_size(view.page_size, config)
    }
}

/// Apply search / sort / page flags on top of a list's default view.
///
/// `--dir` alone flips the direction of the default sort.
pub fn configure_view<F, K>(
    state: &mut ViewState<F, K>,
    view: &ViewArgs,
    field: Option<F>,
    sort: Option<K>,
) where
    F: Copy + PartialEq,
    K: Copy + PartialEq,
{
    state.set_query(view.search.clone().unwrap_or_default());
    state.set_scope(field.map_or(SearchScope::All, SearchScope::Field));
    if let Some(key) = sort {
        state.set_sort(Some(SortState::new(key, view.dir.unwrap_or_default())));
    } else if let (Some(dir), Some(mut current)) = (view.dir, state.sort()) {
        current.dir = dir;
        state.set_sort(Some(current));
    }
    state.pager_mut().go_to(view.page);
}
