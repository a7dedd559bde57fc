//! Mutation coordinator: one optimistic local update paired with one remote
//! call per user action.
//!
//! Status-advancing mutations apply a provisional row, send the full record,
//! and revert to the prior snapshot when the call fails — every call site
//! gets the same commit-on-success / revert-on-failure behavior. Decision
//! mutations (approve/reject) touch the cache only after a 2xx, and at most
//! one decision may be in flight across the whole visible list.
//!
//! The backend seams are traits so the coordinator can run against the real
//! `ApiClient` or a stub in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::ApiError;
use crate::state::{ClientState, DecisionKind};
use crate::types::{month_label, ProgressRecord, ProgressStatus, RequestStatus, TrainingRequest};

/// Failure of a coordinated mutation. `Api` wraps the remote taxonomy; the
/// rest are caught locally before any network call.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("no cached record with id {0}")]
    MissingRecord(i64),
    #[error("illegal status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: ProgressStatus,
        to: ProgressStatus,
    },
    #[error("request {id} is already {status:?}")]
    NotPending { id: i64, status: RequestStatus },
    #[error("another decision action is still in flight")]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Remote side of a progress mutation.
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    async fn update_progress(&self, record: &ProgressRecord) -> Result<(), ApiError>;
}

/// Remote side of an approve/reject decision.
#[async_trait]
pub trait DecisionBackend: Send + Sync {
    async fn approve_request(&self, request_id: i64) -> Result<(), ApiError>;
    async fn reject_request(&self, request_id: i64) -> Result<(), ApiError>;
}

/// Compute the record state a transition produces, including the
/// status-dependent side fields.
///
/// `Started` stamps the start date; `Completed` stamps the end date and the
/// month-completed label together — never one without the other.
pub fn next_record(
    current: &ProgressRecord,
    target: ProgressStatus,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, MutationError> {
    if !current.status.can_advance_to(target) {
        return Err(MutationError::InvalidTransition {
            from: current.status,
            to: target,
        });
    }

    let mut next = current.clone();
    next.status = target;
    next.last_updated = now;
    match target {
        ProgressStatus::Started => {
            next.start_date = Some(now);
        }
        ProgressStatus::Completed => {
            next.end_date = Some(now);
            next.month_completed = Some(month_label(now));
        }
        // can_advance_to admits no other target.
        _ => {}
    }
    Ok(next)
}

/// Advance one cached progress record to `target`.
///
/// The transition is validated locally first; a violation never reaches the
/// network. The provisional row is applied, the full record is sent, and a
/// failed call restores the prior snapshot so the cache always ends equal to
/// what the backend confirmed.
pub async fn advance_progress<B: ProgressBackend + ?Sized>(
    state: &ClientState,
    backend: &B,
    progress_id: i64,
    target: ProgressStatus,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, MutationError> {
    let current = state
        .progress
        .get(progress_id)
        .ok_or(MutationError::MissingRecord(progress_id))?;
    let next = next_record(&current, target, now)?;

    state.progress.put(next.clone());
    match backend.update_progress(&next).await {
        Ok(()) => {
            log::debug!("progress {progress_id} advanced to {}", target.label());
            Ok(next)
        }
        Err(err) => {
            state.progress.put(current);
            log::warn!(
                "progress {progress_id} update to {} failed, cache reverted: {err}",
                target.label()
            );
            Err(err.into())
        }
    }
}

/// Decide one pending training request.
///
/// Claims the list-wide decision slot for the duration of the call; the
/// cached copy's status — and nothing else — transitions only on success.
pub async fn decide_request<B: DecisionBackend + ?Sized>(
    state: &ClientState,
    backend: &B,
    request_id: i64,
    kind: DecisionKind,
) -> Result<TrainingRequest, MutationError> {
    let current = state
        .training_requests
        .get(request_id)
        .ok_or(MutationError::MissingRecord(request_id))?;
    if current.status != RequestStatus::Pending {
        return Err(MutationError::NotPending {
            id: request_id,
            status: current.status,
        });
    }

    let _guard = state
        .begin_decision(request_id, kind)
        .ok_or(MutationError::Busy)?;

    let result = match kind {
        DecisionKind::Approve => backend.approve_request(request_id).await,
        DecisionKind::Reject => backend.reject_request(request_id).await,
    };

    match result {
        Ok(()) => {
            let decided = match kind {
                DecisionKind::Approve => RequestStatus::Approved,
                DecisionKind::Reject => RequestStatus::Rejected,
            };
            state
                .training_requests
                .update_one(request_id, |r| r.status = decided);
            let mut updated = current;
            updated.status = decided;
            Ok(updated)
        }
        Err(err) => {
            log::warn!("decision on request {request_id} failed, cache untouched: {err}");
            Err(err.into())
        }
    }
}
