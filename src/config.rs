use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::editor::DEFAULT_TAB_STOP;

/// Largest accepted tab stop.
pub const MAX_TAB_STOP: usize = 16;
pub const DEFAULT_QUIT_TIMES: u32 = 3;
pub const DEFAULT_MESSAGE_TIMEOUT_SECS: u64 = 5;
pub const MAX_MESSAGE_TIMEOUT_SECS: u64 = 3600;

/// How a save reaches the disk.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Truncate the file and write it in place.
    #[default]
    InPlace,
    /// Write a sibling temp file, then rename it over the target.
    Atomic,
}

impl SaveMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InPlace => "in-place",
            Self::Atomic => "atomic",
        }
    }
}

/// Flags that may come from the command line or a config file. `None` means
/// "not given here".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub tab_stop: Option<usize>,
    pub quit_times: Option<u32>,
    pub message_timeout: Option<u64>,
    pub save_mode: Option<SaveMode>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge, with values in `other` taking precedence.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            tab_stop: other.tab_stop.or(self.tab_stop),
            quit_times: other.quit_times.or(self.quit_times),
            message_timeout: other.message_timeout.or(self.message_timeout),
            save_mode: other.save_mode.or(self.save_mode),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

/// Resolved editor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    pub quit_times: u32,
    /// How long a status message stays visible.
    pub message_timeout: Duration,
    pub save_mode: SaveMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
            message_timeout: Duration::from_secs(DEFAULT_MESSAGE_TIMEOUT_SECS),
            save_mode: SaveMode::default(),
        }
    }
}

impl Settings {
    pub fn from_flags(flags: &ConfigFlags) -> Self {
        let defaults = Self::default();
        Self {
            tab_stop: flags
                .tab_stop
                .map_or(defaults.tab_stop, |n| n.clamp(1, MAX_TAB_STOP)),
            quit_times: flags.quit_times.unwrap_or(defaults.quit_times),
            message_timeout: flags
                .message_timeout
                .map_or(defaults.message_timeout, |secs| {
                    Duration::from_secs(secs.clamp(1, MAX_MESSAGE_TIMEOUT_SECS))
                }),
            save_mode: flags.save_mode.unwrap_or(defaults.save_mode),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("tex").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("tex")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("tex").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("tex").join("config");
        }
    }

    PathBuf::from(".texrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".texrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        // One flag per line; the value is the rest of the line so paths
        // may contain spaces.
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((flag, value)) => vec![flag.to_owned(), value.trim().to_owned()],
            None => vec![line.to_owned()],
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# tex defaults (saved with --save)".to_string()];
    if let Some(n) = flags.tab_stop {
        lines.push(format!("--tab-stop {n}"));
    }
    if let Some(n) = flags.quit_times {
        lines.push(format!("--quit-times {n}"));
    }
    if let Some(secs) = flags.message_timeout {
        lines.push(format!("--message-timeout {secs}"));
    }
    if let Some(mode) = flags.save_mode {
        lines.push(format!("--save-mode {}", mode.as_str()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pull known flags out of a token list, accepting both `--flag value` and
/// `--flag=value`. Unknown tokens and unparsable values are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        let takes_value = matches!(
            name,
            "--tab-stop" | "--quit-times" | "--message-timeout" | "--save-mode" | "--log-file"
        );
        if takes_value {
            let value = match inline {
                Some(value) => Some(value),
                None => {
                    let next = tokens.get(i + 1).map(String::as_str);
                    if next.is_some() {
                        i += 1;
                    }
                    next
                }
            };
            if let Some(value) = value {
                apply_flag(&mut flags, name, value);
            }
        }
        i += 1;
    }
    flags
}

fn apply_flag(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--tab-stop" => flags.tab_stop = value.parse().ok().or(flags.tab_stop),
        "--quit-times" => flags.quit_times = value.parse().ok().or(flags.quit_times),
        "--message-timeout" => {
            flags.message_timeout = value.parse().ok().or(flags.message_timeout);
        }
        "--save-mode" => flags.save_mode = parse_save_mode(value).or(flags.save_mode),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}

fn parse_save_mode(s: &str) -> Option<SaveMode> {
    match s {
        "in-place" => Some(SaveMode::InPlace),
        "atomic" => Some(SaveMode::Atomic),
        _ => None,
    }
}
