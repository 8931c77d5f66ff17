//! Tex - a small terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! tex notes.txt
//! tex --tab-stop 4 main.c
//! tex --save-mode atomic --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tex::app::App;
use tex::config::{
    ConfigFlags, SaveMode, Settings, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use tex::logging;

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "tex", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on first save if it does not exist)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Columns between tab stops (1-16)
    #[arg(long, value_name = "N")]
    tab_stop: Option<usize>,

    /// Extra Ctrl-Q presses needed to quit with unsaved changes
    #[arg(long, value_name = "N")]
    quit_times: Option<u32>,

    /// Seconds a status message stays visible
    #[arg(long, value_name = "SECONDS")]
    message_timeout: Option<u64>,

    /// How saves are written to disk
    #[arg(long, value_enum)]
    save_mode: Option<SaveMode>,

    /// Write log events to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            tab_stop: self.tab_stop,
            quit_times: self.quit_times,
            message_timeout: self.message_timeout,
            save_mode: self.save_mode,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    logging::init(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "resolved flags");

    // --save / --clear without a file only update the defaults
    if cli.file.is_none() && (cli.save || cli.clear) {
        return Ok(());
    }

    let mut app = App::new(cli.file).with_settings(Settings::from_flags(&effective));

    app.run().context("Application error")
}
