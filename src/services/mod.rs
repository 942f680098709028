pub mod app_config;
pub mod derivation;
pub mod estimator;
pub mod formatting;
pub mod inputs_yaml;
pub mod lead_forward;
pub mod lead_relay;
pub mod report_capture;
pub mod report_document;
pub mod report_export;
pub mod report_view;
