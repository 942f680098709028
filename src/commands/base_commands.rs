use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::display::{Currency, Locale};
use crate::domain::inputs::InputField;
use crate::services::app_config::AppConfig;
use crate::services::estimator::EstimatorSession;
use crate::services::inputs_yaml::{InputsYamlError, load_inputs_from_yaml_file};

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Optional YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the estimator inputs come from and how they are displayed.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Inputs YAML file; missing keys keep their defaults
    #[arg(short, long)]
    pub input: Option<String>,
    /// Override a field, e.g. `--set costPerPlate=200`
    #[arg(short, long = "set", value_parser = parse_assignment)]
    pub set: Vec<(InputField, String)>,
    /// Show advanced waste inputs
    #[arg(short, long)]
    pub advanced: bool,
    /// Display locale
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
    /// Display currency (label only, no conversion)
    #[arg(long, value_enum)]
    pub currency: Option<Currency>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute savings, ROI and payback for a set of inputs
    Estimate {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Write the default inputs to a YAML file
    Defaults {
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Edit inputs interactively and watch the estimate update
    Session {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Forward your details and download the detailed PDF report
    Report {
        #[command(flatten)]
        inputs: InputArgs,
        /// Your name
        #[arg(long)]
        name: String,
        /// Work email
        #[arg(long)]
        email: String,
        /// Company
        #[arg(long)]
        company: String,
        /// Directory the report is saved to
        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Run the local lead-capture endpoint
    Serve {
        /// Listen address, e.g. 127.0.0.1:3000
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_assignment(raw: &str) -> Result<(InputField, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim().parse::<InputField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

impl InputArgs {
    /// Builds a session from defaults, the inputs file, then `--set` and
    /// `--advanced`, in that order. Locale and currency fall back to the config.
    pub fn build_session(&self, config: &AppConfig) -> Result<EstimatorSession, InputsYamlError> {
        let mut session = EstimatorSession::default();
        if let Some(path) = &self.input {
            session.replace_inputs(load_inputs_from_yaml_file(path)?);
        }
        for (field, value) in &self.set {
            session.set_field(*field, value);
        }
        if self.advanced {
            session.set_show_advanced(true);
        }
        session.set_locale(self.locale.unwrap_or(config.locale));
        session.set_currency(self.currency.unwrap_or(config.currency));
        Ok(session)
    }
}
