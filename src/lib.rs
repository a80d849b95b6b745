//! Account signup — progressive-disclosure registration flow.

pub mod cli;
pub mod config;
pub mod error;
pub mod places;
pub mod register;
