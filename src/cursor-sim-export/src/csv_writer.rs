//! Fixed-schema CSV encoding for survey responses.

use cursor_sim_store::SurveyResponse;

use crate::error::ExportError;

const HEADER: [&str; 17] = [
    "ResponseID",
    "StartDate",
    "EndDate",
    "Duration",
    "Status",
    "Email",
    "Department",
    "Role",
    "Tenure",
    "Q1_OverallSatisfaction",
    "Q2_EaseOfUse",
    "Q3_CodeQuality",
    "Q4_Productivity",
    "Q5_Reliability",
    "Q6_Support",
    "Q7_Documentation",
    "Q8_WouldRecommend",
];

pub fn encode(responses: &[&SurveyResponse]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer
        .write_record(HEADER.iter().chain(std::iter::once(&"Q9_AdditionalComments")))
        .map_err(|e| ExportError::Materialization(e.to_string()))?;

    for r in responses {
        let mut record: Vec<String> = vec![
            r.response_id.clone(),
            r.start_date.to_rfc3339(),
            r.end_date.to_rfc3339(),
            r.duration_seconds.to_string(),
            r.status.clone(),
            r.email.clone(),
            r.department.clone(),
            r.role.clone(),
            r.tenure.clone(),
        ];
        record.extend(r.likert_answers.iter().map(|v| v.to_string()));
        record.push(r.additional_comments.clone());
        writer.write_record(&record).map_err(|e| ExportError::Materialization(e.to_string()))?;
    }

    writer.into_inner().map_err(|e| ExportError::Materialization(e.to_string()))
}
