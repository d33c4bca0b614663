//! Enterprise-productivity-assistant surface, shaped after the
//! Microsoft 365 Copilot usage-report API.

use std::sync::Arc;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use cursor_sim_store::CopilotApp;

use crate::api::types::{CopilotUsageQuery, CopilotUserDetail, CopilotUsageResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const FULL_WINDOW_FALLBACK_DAYS: i64 = 180;

fn period_window(state: &AppState, period: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let latest = state
        .store
        .all_copilot_activity_events()
        .iter()
        .map(|e| e.ts)
        .max()
        .unwrap_or_else(Utc::now);

    let days = match period {
        "D7" => 7,
        "D30" => 30,
        "D90" => 90,
        "D180" => 180,
        "ALL" if state.copilot_all_period_is_full_window => {
            let earliest = state
                .store
                .all_copilot_activity_events()
                .iter()
                .map(|e| e.ts)
                .min()
                .unwrap_or(latest);
            return Ok((earliest, latest));
        }
        "ALL" => return Ok((latest - Duration::days(FULL_WINDOW_FALLBACK_DAYS), latest)),
        other => return Err(AppError::Validation(format!("invalid period: {other}"))),
    };
    Ok((latest - Duration::days(days), latest))
}

pub async fn usage_user_detail(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<CopilotUsageQuery>,
) -> AppResult<Response> {
    if !state.surfaces.copilot {
        return Err(AppError::NotFound("productivity-assistant surface is not enabled".to_string()));
    }

    let period = uri
        .path()
        .rsplit("(period='")
        .next()
        .and_then(|s| s.strip_suffix("')"))
        .ok_or_else(|| AppError::Validation("missing period argument".to_string()))?
        .to_string();
    let (since, until) = period_window(&state, &period)?;

    let mut by_user: std::collections::BTreeMap<String, (String, [Option<DateTime<Utc>>; 8], Option<DateTime<Utc>>)> =
        std::collections::BTreeMap::new();

    for event in state.store.get_copilot_activity_by_range(since, until) {
        let entry = by_user.entry(event.user_principal_name.clone()).or_insert_with(|| {
            (event.display_name.clone(), [None; 8], None)
        });
        let idx = CopilotApp::ALL.iter().position(|a| *a == event.app).expect("app is always one of ALL");
        entry.1[idx] = Some(entry.1[idx].map_or(event.ts, |existing| existing.max(event.ts)));
        entry.2 = Some(entry.2.map_or(event.ts, |existing| existing.max(event.ts)));
    }

    let refresh_date = Utc::now().to_rfc3339();
    let mut details: Vec<_> = by_user
        .into_iter()
        .map(|(upn, (display_name, per_app, overall))| CopilotUserDetail {
            report_refresh_date: refresh_date.clone(),
            report_period: period.clone(),
            user_principal_name: upn,
            display_name,
            last_activity_date: overall.map(|d| d.to_rfc3339()),
            teams_last_activity_date: per_app[0].map(|d| d.to_rfc3339()),
            word_last_activity_date: per_app[1].map(|d| d.to_rfc3339()),
            excel_last_activity_date: per_app[2].map(|d| d.to_rfc3339()),
            power_point_last_activity_date: per_app[3].map(|d| d.to_rfc3339()),
            outlook_last_activity_date: per_app[4].map(|d| d.to_rfc3339()),
            one_note_last_activity_date: per_app[5].map(|d| d.to_rfc3339()),
            loop_last_activity_date: per_app[6].map(|d| d.to_rfc3339()),
            chat_last_activity_date: per_app[7].map(|d| d.to_rfc3339()),
        })
        .collect();
    details.sort_by(|a, b| a.user_principal_name.cmp(&b.user_principal_name));

    let wants_csv = query.format.as_deref() == Some("text/csv");
    if wants_csv {
        let bytes = render_csv(&details);
        let token = state.downloads.stash(bytes);
        let location = format!("/reports/downloads/{token}");
        let response = Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, location)
            .body(axum::body::Body::empty())
            .expect("static response is well-formed");
        return Ok(response);
    }

    Ok(Json(CopilotUsageResponse { next_link: None, value: details }).into_response())
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> AppResult<Response> {
    let bytes = state
        .downloads
        .take(&token)
        .ok_or_else(|| AppError::NotFound(format!("unknown download token: {token}")))?;
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .body(axum::body::Body::from(bytes))
        .expect("static response is well-formed");
    Ok(response)
}


fn render_csv(details: &[CopilotUserDetail]) -> Vec<u8> {
    let mut out = String::from(
        "Report Refresh Date,Report Period,User Principal Name,Display Name,Last Activity Date,Teams Last Activity Date,Word Last Activity Date,Excel Last Activity Date,PowerPoint Last Activity Date,Outlook Last Activity Date,OneNote Last Activity Date,Loop Last Activity Date,Chat Last Activity Date\n",
    );
    for d in details {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            d.report_refresh_date,
            d.report_period,
            d.user_principal_name,
            d.display_name,
            d.last_activity_date.as_deref().unwrap_or(""),
            d.teams_last_activity_date.as_deref().unwrap_or(""),
            d.word_last_activity_date.as_deref().unwrap_or(""),
            d.excel_last_activity_date.as_deref().unwrap_or(""),
            d.power_point_last_activity_date.as_deref().unwrap_or(""),
            d.outlook_last_activity_date.as_deref().unwrap_or(""),
            d.one_note_last_activity_date.as_deref().unwrap_or(""),
            d.loop_last_activity_date.as_deref().unwrap_or(""),
            d.chat_last_activity_date.as_deref().unwrap_or(""),
        ));
    }
    out.into_bytes()
}
