//! Port traits separating the domain core from its collaborators.

pub mod config_port;
pub mod observation_port;
pub mod report_port;
