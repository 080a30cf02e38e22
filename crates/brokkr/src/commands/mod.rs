//! Command handlers for the Brokkr CLI

pub mod doctor;
pub mod new;
