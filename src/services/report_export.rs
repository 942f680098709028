use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::lead::{Contact, LeadRecord};
use crate::services::lead_forward::{LeadSink, forward_best_effort};
use crate::services::report_capture::RegionCapture;
use crate::services::report_document::{DocumentComposer, DocumentHeader, REPORT_FILE_NAME, RenderError};
use crate::services::report_view::ReportView;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("contact field '{0}' is required")]
    MissingContactField(&'static str),
    #[error("a report export is already in progress")]
    AlreadyInProgress,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to save report: {0}")]
    Save(#[from] std::io::Error),
    #[error("report rendering task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardStatus {
    /// No lead sink is configured.
    Skipped,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub document_path: PathBuf,
    pub forward: ForwardStatus,
}

/// Runs the gated report export: forward the lead, then render and save the
/// document. The forward is best effort; rendering failures are returned.
pub struct ReportExporter {
    sink: Option<Arc<dyn LeadSink>>,
    capture: Arc<dyn RegionCapture>,
    composer: Arc<dyn DocumentComposer>,
    header: Arc<DocumentHeader>,
    output_dir: PathBuf,
    in_flight: AtomicBool,
}

impl ReportExporter {
    pub fn new(
        sink: Option<Arc<dyn LeadSink>>,
        capture: Arc<dyn RegionCapture>,
        composer: Arc<dyn DocumentComposer>,
        header: DocumentHeader,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            sink,
            capture,
            composer,
            header: Arc::new(header),
            output_dir: output_dir.as_ref().to_path_buf(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn document_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn request_export(&self, contact: &Contact, view: ReportView) -> Result<ExportOutcome, ExportError> {
        if let Some(field) = contact.missing_field() {
            return Err(ExportError::MissingContactField(field));
        }
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(ExportError::AlreadyInProgress)?;

        let lead = LeadRecord {
            contact: contact.clone(),
            locale: view.locale,
            currency: view.currency,
            inputs: view.inputs.clone(),
            outputs: view.outputs,
        };
        let forward = self.forward_lead(&lead).await;

        let bytes = self.render(view).await?;
        let document_path = self.document_path();
        if !self.output_dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(&self.output_dir).await?;
        }
        tokio::fs::write(&document_path, bytes).await?;
        info!(path = %document_path.display(), "report saved");

        Ok(ExportOutcome {
            document_path,
            forward,
        })
    }

    /// Never fails: every problem on the way to the sink is logged and
    /// reported as `ForwardStatus::Failed`.
    async fn forward_lead(&self, lead: &LeadRecord) -> ForwardStatus {
        let Some(sink) = &self.sink else {
            return ForwardStatus::Skipped;
        };
        let delivered = match serde_json::to_value(lead) {
            Ok(payload) => forward_best_effort(sink.as_ref(), &payload).await,
            Err(e) => {
                warn!(error = %e, "lead could not be serialized");
                false
            }
        };
        if delivered {
            ForwardStatus::Delivered
        } else {
            warn!(company = %lead.contact.company, "continuing report export without lead delivery");
            ForwardStatus::Failed
        }
    }

    async fn render(&self, view: ReportView) -> Result<Vec<u8>, ExportError> {
        let capture = Arc::clone(&self.capture);
        let composer = Arc::clone(&self.composer);
        let header = Arc::clone(&self.header);
        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, RenderError> {
            let image = capture.capture_region(&view)?;
            composer.compose_document(&header, &image)
        })
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;
        Ok(bytes)
    }
}

/// Clears the in-flight flag when the export finishes, whatever the outcome.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
