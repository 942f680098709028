use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::RgbImage;
use serde_json::Value;
use tokio::sync::Notify;

use crate::services::lead_forward::{ForwardError, LeadSink};
use crate::services::report_capture::RegionCapture;
use crate::services::report_document::{DocumentComposer, DocumentHeader, RenderError};
use crate::services::report_view::ReportView;

// A LeadSink that keeps every payload it receives
#[derive(Default)]
pub struct RecordingSink {
    payloads: Mutex<Vec<Value>>,
}

impl RecordingSink {
    pub fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadSink for RecordingSink {
    async fn forward(&self, payload: &Value) -> Result<(), ForwardError> {
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

pub struct FailingSink;

#[async_trait]
impl LeadSink for FailingSink {
    async fn forward(&self, _payload: &Value) -> Result<(), ForwardError> {
        Err(ForwardError::Status(502))
    }
}

// Blocks inside forward() until release() is called
#[derive(Default)]
pub struct GatedSink {
    called: Notify,
    released: Notify,
}

impl GatedSink {
    pub async fn wait_until_called(&self) {
        self.called.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[async_trait]
impl LeadSink for GatedSink {
    async fn forward(&self, _payload: &Value) -> Result<(), ForwardError> {
        self.called.notify_one();
        self.released.notified().await;
        Ok(())
    }
}

/// Capture that skips drawing and returns a small solid raster.
pub struct SolidCapture;

impl RegionCapture for SolidCapture {
    fn capture_region(&self, _view: &ReportView) -> Result<RgbImage, RenderError> {
        Ok(RgbImage::from_pixel(60, 40, image::Rgb([255, 255, 255])))
    }
}

pub struct CountingCapture(Arc<AtomicUsize>);

impl RegionCapture for CountingCapture {
    fn capture_region(&self, view: &ReportView) -> Result<RgbImage, RenderError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        SolidCapture.capture_region(view)
    }
}

pub fn recording_capture() -> (Arc<dyn RegionCapture>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (Arc::new(CountingCapture(count.clone())), count)
}

pub struct FailingComposer;

impl DocumentComposer for FailingComposer {
    fn compose_document(&self, _header: &DocumentHeader, _image: &RgbImage) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Compose("renderer unavailable".to_string()))
    }
}
