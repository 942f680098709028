use crate::commands::base_commands::{Commands, OutputFormat};
use crate::commands::report_format::format_estimate_report;
use crate::services::app_config::AppConfig;
use crate::services::inputs_yaml::{estimate_to_json, estimate_to_yaml};

pub async fn estimate_command(cmd: Commands, config: &AppConfig) {
    if let Commands::Estimate {
        inputs,
        format,
        output,
    } = cmd
    {
        let session = match inputs.build_session(config) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("Failed to load inputs: {e:?}");
                return;
            }
        };

        let rendered = match format {
            OutputFormat::Text => Ok(format_estimate_report(&session.view())),
            OutputFormat::Yaml => estimate_to_yaml(session.inputs(), session.outputs()).map_err(|e| e.to_string()),
            OutputFormat::Json => estimate_to_json(session.inputs(), session.outputs()).map_err(|e| e.to_string()),
        };
        let rendered = match rendered {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize estimate: {e}");
                return;
            }
        };

        match output {
            Some(output) => {
                if let Err(e) = tokio::fs::write(&output, rendered).await {
                    eprintln!("Failed to write estimate: {e:?}");
                } else {
                    println!("Estimate written to {output}");
                }
            }
            None => println!("{rendered}"),
        }
    }
}
