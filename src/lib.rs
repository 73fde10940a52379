pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod fs;
pub mod render;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod utils;

use std::io;

use config::ModeConfig;
pub use error::Result;

use crate::cli::Cli;
use crate::commands::App;
use crate::session::Session;
use crate::store::EntryStore;

/// Runs one invocation, or the interactive session when no command was given.
///
/// Command errors are printed and do not make this fail; only configuration,
/// telemetry and terminal I/O errors do.
pub fn run(cli: Cli) -> Result<()> {
    let runtime = config::load(&cli)?;
    telemetry::init(runtime.context.verbosity)?;

    let context = runtime.context;
    let app = App::new(EntryStore::new(context.cache_dir), io::stdout())
        .with_preview_chars(context.preview_chars);
    let mut session = Session::new(commands::registry(), app).with_app_name(&context.app_name);

    match runtime.mode {
        ModeConfig::OneShot(argv) => session.run_once(&argv),
        ModeConfig::Interactive => {
            session.print_hint()?;
            session.run(io::stdin().lock())
        }
    }
}
