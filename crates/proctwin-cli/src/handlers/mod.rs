pub mod analyze;
pub mod automations;
pub mod detect;
pub mod preview;
