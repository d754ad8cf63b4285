//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tui-match3/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::Alphabet;
use crate::engine::{Pacing, StageDelays};
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, MAX_BOARD_SIDE};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Match3Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardConfig {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    /// Each char is one tile
    pub tiles: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PacingConfig {
    pub staged: Option<bool>,
    pub scan_ms: Option<u32>,
    pub remove_ms: Option<u32>,
    pub fall_ms: Option<u32>,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub seed: Option<u32>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

/// Values taken from command-line flags (None / false = not given)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub seed: Option<u32>,
    pub tiles: Option<String>,
    pub instant: bool,
}

pub const ENV_SEED: &str = "TUI_MATCH3_SEED";
pub const ENV_LOG: &str = "TUI_MATCH3_LOG";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub rows: usize,
    pub cols: usize,
    pub alphabet: Alphabet,
    pub seed: u32,
    pub pacing: Pacing,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tui-match3/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tui-match3").join("config.toml"))
}

/// Load config from `~/.tui-match3/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `Match3Config::default()`.
pub fn load_config() -> Result<Match3Config, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(Match3Config::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(Match3Config::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<Match3Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<Match3Config, ConfigError> {
    let config: Match3Config = toml::from_str(contents).map_err(ConfigError::Parse)?;
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# tui-match3 configuration
# All settings are optional. Defaults are used for anything left out.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [board]
# rows = 8                     # 1 to 64
# cols = 8
# tiles = "🥝🍋🍊🍌🥥🍇🍉"       # one tile per character, at least two

# [pacing]
# staged = true                # false resolves cascades instantly
# scan_ms = 700
# remove_ms = 900
# fall_ms = 1100

# [general]
# seed = 12345                 # or TUI_MATCH3_SEED; random when unset
# log_file = "tui-match3.log"  # or TUI_MATCH3_LOG; no logging when unset
# log_level = "info"           # off, error, warn, info, debug, trace
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config: defaults → config file → env vars → CLI.
pub fn resolve(config: &Match3Config, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Like [`resolve`], reading the environment through `env`.
pub fn resolve_with_env(
    config: &Match3Config,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let rows = cli.rows.or(config.board.rows).unwrap_or(DEFAULT_ROWS);
    let cols = cli.cols.or(config.board.cols).unwrap_or(DEFAULT_COLS);
    if rows == 0 || cols == 0 {
        return Err(ConfigError::Invalid(format!(
            "board must have at least one row and one column, got {rows}x{cols}"
        )));
    }
    if rows > MAX_BOARD_SIDE || cols > MAX_BOARD_SIDE {
        return Err(ConfigError::Invalid(format!(
            "board is limited to {MAX_BOARD_SIDE}x{MAX_BOARD_SIDE}, got {rows}x{cols}"
        )));
    }

    let alphabet = match cli.tiles.as_deref().or(config.board.tiles.as_deref()) {
        Some(symbols) => Alphabet::parse(symbols)
            .map_err(|e| ConfigError::Invalid(format!("tiles {symbols:?}: {e}")))?,
        None => Alphabet::default(),
    };

    let env_seed = match env(ENV_SEED) {
        Some(raw) => Some(raw.trim().parse::<u32>().map_err(|e| {
            ConfigError::Invalid(format!("{ENV_SEED}={raw:?} is not a seed: {e}"))
        })?),
        None => None,
    };
    let seed = cli
        .seed
        .or(env_seed)
        .or(config.general.seed)
        .unwrap_or_else(clock_seed);

    let staged = !cli.instant && config.pacing.staged.unwrap_or(true);
    let pacing = if staged {
        let defaults = StageDelays::default();
        Pacing::Staged(StageDelays {
            scan_ms: config.pacing.scan_ms.unwrap_or(defaults.scan_ms),
            remove_ms: config.pacing.remove_ms.unwrap_or(defaults.remove_ms),
            fall_ms: config.pacing.fall_ms.unwrap_or(defaults.fall_ms),
        })
    } else {
        Pacing::Immediate
    };

    let log_file = env(ENV_LOG)
        .or_else(|| config.general.log_file.clone())
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level {level:?}")))?,
        None => LevelFilter::Info,
    };

    Ok(ResolvedConfig {
        rows,
        cols,
        alphabet,
        seed,
        pacing,
        log_file,
        log_level,
    })
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
