//! Blank-line cleanup for markdown documents and release-based plugin
//! installs for vaults.

pub mod config;
pub mod document;
pub mod error;
pub mod flow;
pub mod host;
pub mod install;
pub mod release;
pub mod text;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::KnifeError;
