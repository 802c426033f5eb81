//! fastfetch library
//!
//! Prints system information next to a distribution logo.

pub mod cli;
pub mod collectors;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod logo;
pub mod modules;
pub mod state;
pub mod utils;

pub use error::{ArgError, FastfetchError, Result};

use cli::Options;
use display::Printer;
use state::State;
use std::io::Write;

/// Build the state from `options` and the config file, then print every
/// category to `out`
pub fn run<W: Write>(options: &Options, out: W) -> Result<()> {
    let config = config::load_config()?;
    let state = State::init(options, &config)?;
    tracing::debug!(logo = state.logo.name(), user = %state.user.name, "state ready");

    let mut printer = Printer::new(&state, out);
    modules::print_all(&mut printer)?;
    Ok(())
}
