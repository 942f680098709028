pub mod base_commands;
pub mod defaults_cmd;
pub mod estimate_cmd;
pub mod report_cmd;
pub mod report_format;
pub mod serve_cmd;
pub mod session_cmd;
