use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use crate::domain::inputs::InputSnapshot;
use crate::domain::outputs::DerivedOutputs;

#[derive(Error, Debug)]
pub enum InputsYamlError {
    #[error("failed to read inputs file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse inputs yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Serialize)]
struct EstimateRecord<'a> {
    inputs: &'a InputSnapshot,
    outputs: &'a DerivedOutputs,
}

pub fn load_inputs_from_yaml_file(path: &str) -> Result<InputSnapshot, InputsYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_inputs_from_yaml_str(&contents)
}

/// Keys that are absent keep their default value.
pub fn deserialize_inputs_from_yaml_str(contents: &str) -> Result<InputSnapshot, InputsYamlError> {
    if contents.trim().is_empty() {
        return Ok(InputSnapshot::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

pub fn serialize_inputs_to_yaml<W: Write>(writer: &mut W, inputs: &InputSnapshot) -> io::Result<()> {
    let yaml = serde_yaml::to_string(inputs).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

pub fn estimate_to_yaml(inputs: &InputSnapshot, outputs: &DerivedOutputs) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&EstimateRecord { inputs, outputs })
}

pub fn estimate_to_json(inputs: &InputSnapshot, outputs: &DerivedOutputs) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&EstimateRecord { inputs, outputs })
}
