//! Response and query-parameter shapes for the external surfaces.

use serde::{Deserialize, Serialize};

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================================
// Developer-AI surface
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CommitsQuery {
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub user: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommitsResponse {
    pub commits: Vec<cursor_sim_store::Commit>,
}

#[derive(Debug, Serialize)]
pub struct ModelRollup {
    pub model: String,
    pub commit_count: usize,
    pub total_lines_added: u32,
    pub ai_lines_added: u32,
}

#[derive(Debug, Serialize)]
pub struct UserUsageRollup {
    pub user_id: String,
    pub total: u32,
}

#[derive(Debug, Serialize)]
pub struct TeamMember {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub seniority: cursor_sim_store::Seniority,
    pub activity_level: cursor_sim_store::ActivityLevel,
}

// ============================================================================
// Legal-AI surface (Harvey-shaped)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HarveyUsageQuery {
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub user: Option<String>,
    pub task: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    100
}

pub const HARVEY_MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Serialize)]
pub struct HarveyEvent {
    #[serde(rename = "Message ID")]
    pub message_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "Task")]
    pub task: &'static str,
    #[serde(rename = "Client Matter #")]
    pub client_matter: String,
    #[serde(rename = "Source")]
    pub source: &'static str,
    #[serde(rename = "Number of documents")]
    pub document_count: u32,
    #[serde(rename = "Feedback Comment")]
    pub feedback_comment: String,
    #[serde(rename = "Feedback Sentiment")]
    pub feedback_sentiment: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HarveyPagination {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(rename = "totalItems")]
    pub total_items: u32,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "hasPreviousPage")]
    pub has_previous_page: bool,
}

#[derive(Debug, Serialize)]
pub struct HarveyParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HarveyUsageResponse {
    pub data: Vec<HarveyEvent>,
    pub pagination: HarveyPagination,
    pub params: HarveyParams,
}

// ============================================================================
// Enterprise-productivity-assistant surface (Copilot-shaped)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CopilotUsageQuery {
    #[serde(rename = "$format")]
    pub format: Option<String>,
    #[serde(rename = "$skiptoken")]
    pub skiptoken: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CopilotUserDetail {
    #[serde(rename = "reportRefreshDate")]
    pub report_refresh_date: String,
    #[serde(rename = "reportPeriod")]
    pub report_period: String,
    #[serde(rename = "userPrincipalName")]
    pub user_principal_name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "lastActivityDate")]
    pub last_activity_date: Option<String>,
    #[serde(rename = "teamsLastActivityDate")]
    pub teams_last_activity_date: Option<String>,
    #[serde(rename = "wordLastActivityDate")]
    pub word_last_activity_date: Option<String>,
    #[serde(rename = "excelLastActivityDate")]
    pub excel_last_activity_date: Option<String>,
    #[serde(rename = "powerPointLastActivityDate")]
    pub power_point_last_activity_date: Option<String>,
    #[serde(rename = "outlookLastActivityDate")]
    pub outlook_last_activity_date: Option<String>,
    #[serde(rename = "oneNoteLastActivityDate")]
    pub one_note_last_activity_date: Option<String>,
    #[serde(rename = "loopLastActivityDate")]
    pub loop_last_activity_date: Option<String>,
    #[serde(rename = "chatLastActivityDate")]
    pub chat_last_activity_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CopilotUsageResponse {
    #[serde(rename = "@odata.nextLink", skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    pub value: Vec<CopilotUserDetail>,
}

// ============================================================================
// Survey-export surface (Qualtrics-shaped)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartExportRequest {
    #[allow(dead_code)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QualtricsResult {
    #[serde(rename = "progressId")]
    pub progress_id: String,
    #[serde(rename = "percentComplete")]
    pub percent_complete: u8,
    pub status: &'static str,
    #[serde(rename = "fileId", skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QualtricsMeta {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "httpStatus")]
    pub http_status: String,
}

#[derive(Debug, Serialize)]
pub struct QualtricsEnvelope {
    pub result: QualtricsResult,
    pub meta: QualtricsMeta,
}
