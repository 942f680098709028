pub mod display;
pub mod inputs;
pub mod lead;
pub mod outputs;
