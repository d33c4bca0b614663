//! Legal-AI surface, shaped after the Harvey usage-history API.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};

use crate::api::types::{
    HarveyEvent, HarveyPagination, HarveyParams, HarveyUsageQuery, HarveyUsageResponse,
    HARVEY_MAX_PAGE_SIZE,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn usage_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HarveyUsageQuery>,
) -> AppResult<Json<HarveyUsageResponse>> {
    if !state.surfaces.harvey {
        return Err(AppError::NotFound("legal-AI surface is not enabled".to_string()));
    }

    let from = query.from.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let to = query.to.unwrap_or(DateTime::<Utc>::MAX_UTC);
    let page_size = query.page_size.clamp(1, HARVEY_MAX_PAGE_SIZE);
    let page = query.page.max(1);

    let mut events: Vec<_> = state
        .store
        .get_legal_ai_events_by_range(from, to)
        .into_iter()
        .filter(|e| query.user.as_deref().is_none_or(|u| e.user == u))
        .filter(|e| query.task.as_deref().is_none_or(|t| e.task.as_str() == t))
        .collect();
    events.sort_by(|a, b| a.ts.cmp(&b.ts).then_with(|| a.event_id.cmp(&b.event_id)));

    let total_items = events.len() as u32;
    let total_pages = total_items.div_ceil(page_size).max(1);
    let start = ((page - 1) * page_size) as usize;
    let page_events = events
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .map(|e| HarveyEvent {
            message_id: e.message_id.clone(),
            date: e.ts.to_rfc3339(),
            user: e.user.clone(),
            task: e.task.as_str(),
            client_matter: e.client_matter.clone(),
            source: e.source.as_str(),
            document_count: e.document_count,
            feedback_comment: e.feedback_comment.clone(),
            feedback_sentiment: e.feedback_sentiment.as_str(),
        })
        .collect();

    Ok(Json(HarveyUsageResponse {
        data: page_events,
        pagination: HarveyPagination {
            page,
            page_size,
            total_pages,
            total_items,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        },
        params: HarveyParams { from: query.from.map(|d| d.to_rfc3339()), to: query.to.map(|d| d.to_rfc3339()) },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;

    fn query(page: u32, page_size: u32) -> HarveyUsageQuery {
        HarveyUsageQuery { from: None, to: None, user: None, task: None, page, page_size }
    }

    #[tokio::test]
    async fn disabled_surface_yields_not_found() {
        let state = crate::test_support::state_with_no_surfaces();
        let result = usage_history(State(state), Query(query(1, 100))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn events_are_paginated_in_ascending_timestamp_order() {
        let state = crate::test_support::state_with_all_surfaces();
        let Json(response) = usage_history(State(state), Query(query(1, 1))).await.unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.pagination.total_items, 2);
        assert_eq!(response.pagination.total_pages, 2);
        assert!(response.pagination.has_next_page);
        assert_eq!(response.data[0].message_id, "msg-1");
    }

    #[tokio::test]
    async fn page_size_is_clamped_to_the_max() {
        let state = crate::test_support::state_with_all_surfaces();
        let Json(response) = usage_history(State(state), Query(query(1, 10_000))).await.unwrap();
        assert_eq!(response.pagination.page_size, HARVEY_MAX_PAGE_SIZE);
    }
}
