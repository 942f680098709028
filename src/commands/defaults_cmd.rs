use crate::commands::base_commands::Commands;
use crate::domain::inputs::InputSnapshot;
use crate::services::inputs_yaml::serialize_inputs_to_yaml;

pub async fn defaults_command(cmd: Commands) {
    if let Commands::Defaults { output } = cmd {
        let mut buffer = Vec::new();
        if let Err(e) = serialize_inputs_to_yaml(&mut buffer, &InputSnapshot::default()) {
            eprintln!("Failed to serialize default inputs: {e:?}");
            return;
        }
        if let Err(e) = tokio::fs::write(&output, buffer).await {
            eprintln!("Failed to write default inputs: {e:?}");
        } else {
            println!("Default inputs written to {output}");
        }
    }
}
