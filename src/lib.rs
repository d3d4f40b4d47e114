//! sc-voice - StarCraft voice clips for Telegram inline mode
//!
//! The core is a bilingual keyword search over a fixed clip catalog:
//! [`catalog`] loads and validates clips, [`search`] builds the token index
//! and answers queries. [`bot`] adapts the query handler to Telegram.

pub mod app;
pub mod bot;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod test_utils;

pub use error::{LoadError, Result, VoiceError};
