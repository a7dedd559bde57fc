//! Fetch-and-replace loaders: the on-mount path of every list view.
//!
//! Each loader fetches one collection, orders it the way its view renders,
//! and replaces the matching cache — but only if the scope token it was
//! started under is still current. A response that resolves after its view
//! went away (unmount, navigation, a newer refresh) is discarded instead of
//! writing into shared state. Reloading through these is also the only way
//! one view ever sees another's mutations.

use crate::api::{ApiClient, ApiError};
use crate::projection::{sort_by_last_updated, sort_by_request_date};
use crate::state::{ClientState, Keyed, ListStore, ViewScope};

/// What happened to a finished fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cache was replaced with this many rows.
    Applied(usize),
    /// The scope was invalidated while the call was in flight; nothing was
    /// written.
    Stale,
}

/// Write a fetched collection into its store iff `scope` is still current.
pub fn apply_snapshot<T: Keyed + Clone>(
    state: &ClientState,
    scope: ViewScope,
    store: &ListStore<T>,
    rows: Vec<T>,
) -> LoadOutcome {
    if !state.scope_is_current(scope) {
        log::debug!("discarding response for an invalidated view scope");
        return LoadOutcome::Stale;
    }
    let count = rows.len();
    store.replace(rows);
    LoadOutcome::Applied(count)
}

/// The course catalog, for the request form and the admin catalog page.
pub async fn load_catalog(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_catalog().await?;
    Ok(apply_snapshot(state, scope, &state.catalog, rows))
}

/// One employee's progress records, for the learnings page.
pub async fn load_employee_progress(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
    employee_id: i64,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_employee_progress(employee_id).await?;
    Ok(apply_snapshot(state, scope, &state.progress, rows))
}

/// Every progress record, most recently touched first, for the admin
/// dashboard and analytics.
pub async fn load_all_progress(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_all_progress().await?;
    Ok(apply_snapshot(
        state,
        scope,
        &state.progress,
        sort_by_last_updated(rows),
    ))
}

/// The admin review queue, newest request first.
pub async fn load_training_requests(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_all_requests().await?;
    Ok(apply_snapshot(
        state,
        scope,
        &state.training_requests,
        sort_by_request_date(rows),
    ))
}

/// One employee's own requests, newest first.
pub async fn load_employee_requests(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
    employee_id: i64,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_employee_requests(employee_id).await?;
    Ok(apply_snapshot(
        state,
        scope,
        &state.training_requests,
        sort_by_request_date(rows),
    ))
}

/// Every brown bag request, for the admin listing.
pub async fn load_brown_bags(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_all_brown_bags().await?;
    Ok(apply_snapshot(state, scope, &state.brown_bags, rows))
}

/// One employee's brown bag requests.
pub async fn load_employee_brown_bags(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
    employee_id: i64,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_employee_brown_bags(employee_id).await?;
    Ok(apply_snapshot(state, scope, &state.brown_bags, rows))
}

/// The employee roster, for the participant picker.
pub async fn load_roster(
    client: &ApiClient,
    state: &ClientState,
    scope: ViewScope,
) -> Result<LoadOutcome, ApiError> {
    let rows = client.fetch_all_employees().await?;
    Ok(apply_snapshot(state, scope, &state.roster, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogCourse, EmployeeProfile, Role};

    fn course(id: i64, title: &str) -> CatalogCourse {
        CatalogCourse {
            course_id: id,
            title: title.to_string(),
            resource_link: "https://learn.example.com".to_string(),
            description: String::new(),
            category: "Technical trainings".to_string(),
            training_mode: "Self-paced".to_string(),
            training_source: "Internal".to_string(),
            duration_in_weeks: 1,
            duration_in_hours: 4,
            price: None,
            skills: String::new(),
            points: 5,
        }
    }

    #[test]
    fn current_scope_applies_the_snapshot() {
        let state = ClientState::new();
        let scope = state.current_scope();

        let outcome = apply_snapshot(
            &state,
            scope,
            &state.catalog,
            vec![course(1, "Rust"), course(2, "Go")],
        );
        assert_eq!(outcome, LoadOutcome::Applied(2));
        assert_eq!(state.catalog.len(), 2);
    }

    #[test]
    fn stale_scope_is_discarded() {
        let state = ClientState::new();
        state.catalog.replace(vec![course(1, "Rust")]);

        // Fetch starts, then the view unmounts before the response lands.
        let scope = state.current_scope();
        state.invalidate_scopes();

        let outcome = apply_snapshot(&state, scope, &state.catalog, vec![course(2, "Go")]);
        assert_eq!(outcome, LoadOutcome::Stale);
        // Shared state untouched by the late response.
        assert_eq!(state.catalog.snapshot(), vec![course(1, "Rust")]);
    }

    #[test]
    fn newer_refresh_supersedes_older_fetch() {
        let state = ClientState::new();

        let first = state.current_scope();
        state.invalidate_scopes();
        let second = state.current_scope();

        // The newer fetch resolves first and lands.
        assert_eq!(
            apply_snapshot(&state, second, &state.catalog, vec![course(2, "Go")]),
            LoadOutcome::Applied(1)
        );
        // The older one resolves later and is dropped.
        assert_eq!(
            apply_snapshot(&state, first, &state.catalog, vec![course(1, "Rust")]),
            LoadOutcome::Stale
        );
        assert_eq!(state.catalog.snapshot(), vec![course(2, "Go")]);
    }

    #[test]
    fn tab_divergence_is_expected() {
        // Two "tabs" each hold their own state; one completing a course does
        // not touch the other until it refetches.
        let tab_a = ClientState::new();
        let tab_b = ClientState::new();

        let roster = vec![EmployeeProfile {
            employee_id: 1001,
            name: "Alice Wong".to_string(),
            email: "alice@example.com".to_string(),
            designation: "Engineer".to_string(),
            tech_group: "Platform".to_string(),
            cadre: "IC".to_string(),
            location: "Pune".to_string(),
            role: Role::User,
        }];
        tab_a.roster.replace(roster.clone());
        tab_b.roster.replace(roster);

        tab_a.roster.update_one(1001, |e| e.location = "Remote".to_string());

        assert_eq!(tab_a.roster.get(1001).unwrap().location, "Remote");
        assert_eq!(tab_b.roster.get(1001).unwrap().location, "Pune");
    }
}
