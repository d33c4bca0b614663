//! Export state machine.
//!
//! A single [`ExportManager`] owns both the `progress_id -> job` map and
//! the `file_id -> bytes` map behind one lock, so a job's `complete`
//! transition and its file's visibility happen atomically.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use cursor_sim_store::Store;
use tracing::{info, warn};

use crate::archive::zip_single_file;
use crate::csv_writer::encode as encode_csv;
use crate::error::ExportError;

const DEFAULT_INCREMENT: u8 = 20;
const CSV_MEMBER_NAME: &str = "survey_responses.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    InProgress,
    Complete,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub progress_id: String,
    pub survey_id: String,
    pub status: JobStatus,
    pub percent_complete: u8,
    pub file_id: Option<String>,
    pub error: Option<String>,
}

struct Inner {
    jobs: HashMap<String, ExportJob>,
    files: HashMap<String, Vec<u8>>,
}

/// Owns export job/file state for one store. Cheap to clone behind an
/// `Arc` — all mutation goes through the internal mutex.
pub struct ExportManager {
    store: Arc<Store>,
    increment: u8,
    next_job_seq: AtomicU64,
    next_file_seq: AtomicU64,
    inner: Mutex<Inner>,
}

impl ExportManager {
    pub fn new(store: Arc<Store>) -> Self {
        Self::with_increment(store, DEFAULT_INCREMENT)
    }

    pub fn with_increment(store: Arc<Store>, increment: u8) -> Self {
        Self {
            store,
            increment: increment.max(1),
            next_job_seq: AtomicU64::new(1),
            next_file_seq: AtomicU64::new(1),
            inner: Mutex::new(Inner { jobs: HashMap::new(), files: HashMap::new() }),
        }
    }

    pub fn start_export(&self, survey_id: &str) -> ExportJob {
        let seq = self.next_job_seq.fetch_add(1, Ordering::Relaxed);
        let progress_id = format!("ES_{seq:x}");
        let job = ExportJob {
            progress_id: progress_id.clone(),
            survey_id: survey_id.to_string(),
            status: JobStatus::InProgress,
            percent_complete: 0,
            file_id: None,
            error: None,
        };
        self.inner.lock().unwrap().jobs.insert(progress_id.clone(), job.clone());
        info!(survey_id, progress_id = %progress_id, "export job started");
        job
    }

    pub fn get_progress(&self, progress_id: &str) -> Result<ExportJob, ExportError> {
        let mut guard = self.inner.lock().unwrap();
        let current = guard
            .jobs
            .get(progress_id)
            .cloned()
            .ok_or_else(|| ExportError::UnknownProgress(progress_id.to_string()))?;

        if current.status != JobStatus::InProgress {
            return Ok(current);
        }

        let mut advanced = current;
        advanced.percent_complete = advanced.percent_complete.saturating_add(self.increment).min(100);

        if advanced.percent_complete < 100 {
            guard.jobs.insert(progress_id.to_string(), advanced.clone());
            return Ok(advanced);
        }

        match self.materialize(&advanced.survey_id) {
            Ok(bytes) => {
                let seq = self.next_file_seq.fetch_add(1, Ordering::Relaxed);
                let file_id = format!("FILE_{seq:x}");
                guard.files.insert(file_id.clone(), bytes);
                advanced.status = JobStatus::Complete;
                advanced.file_id = Some(file_id);
            }
            Err(err) => {
                warn!(progress_id, error = %err, "export materialization failed");
                advanced.status = JobStatus::Failed;
                advanced.error = Some(err.to_string());
            }
        }
        guard.jobs.insert(progress_id.to_string(), advanced.clone());
        Ok(advanced)
    }

    pub fn get_file(&self, file_id: &str) -> Result<Vec<u8>, ExportError> {
        self.inner
            .lock()
            .unwrap()
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| ExportError::UnknownFile(file_id.to_string()))
    }

    fn materialize(&self, survey_id: &str) -> Result<Vec<u8>, ExportError> {
        let responses = self.store.get_survey_responses(survey_id);
        let csv_bytes = encode_csv(&responses)?;
        zip_single_file(CSV_MEMBER_NAME, &csv_bytes)
    }
}
