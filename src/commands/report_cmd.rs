use std::sync::Arc;

use crate::commands::base_commands::Commands;
use crate::domain::lead::Contact;
use crate::services::app_config::AppConfig;
use crate::services::lead_forward::sink_from_address;
use crate::services::report_capture::PlottersCapture;
use crate::services::report_document::{DOCUMENT_TITLE, DocumentHeader, PdfComposer};
use crate::services::report_export::{ExportError, ExportOutcome, ForwardStatus, ReportExporter};
use crate::services::report_view::ReportView;

pub async fn report_command(cmd: Commands, config: &AppConfig) {
    if let Commands::Report {
        inputs,
        name,
        email,
        company,
        output_dir,
    } = cmd
    {
        let session = match inputs.build_session(config) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("Failed to load inputs: {e:?}");
                return;
            }
        };

        let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
        let exporter = build_exporter(config, &output_dir);
        let contact = Contact::new(&name, &email, &company);
        run_export(&exporter, &contact, session.view()).await;
    }
}

/// Exporter wired to the configured lead sink, the plotters capture and the
/// PDF composer.
pub fn build_exporter(config: &AppConfig, output_dir: &str) -> ReportExporter {
    let header = DocumentHeader::new(DOCUMENT_TITLE).with_brand_logo(config.brand_logo.as_deref());
    ReportExporter::new(
        sink_from_address(config.lead_webhook_url.as_deref()),
        Arc::new(PlottersCapture::default()),
        Arc::new(PdfComposer),
        header,
        output_dir,
    )
}

/// Runs one export and reports the result on the terminal.
pub async fn run_export(exporter: &ReportExporter, contact: &Contact, view: ReportView) -> Option<ExportOutcome> {
    match exporter.request_export(contact, view).await {
        Ok(outcome) => {
            println!("ROI report written to {}", outcome.document_path.display());
            if outcome.forward == ForwardStatus::Delivered {
                println!("Your details were sent; we will follow up by email.");
            }
            Some(outcome)
        }
        Err(ExportError::MissingContactField(_)) => {
            eprintln!("Name, email and company are required to download the report.");
            None
        }
        Err(e) => {
            eprintln!("Report generation failed, please retry: {e}");
            None
        }
    }
}
