// src/config.rs  |  Runtime configuration (CLI + TOML)
use anyhow::{bail, Context, Result};
use clap::Parser;
use morse_kana::morse::DEFAULT_PLACEHOLDER;
use morse_kana::{Fallback, Mode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The example config is embedded directly in the binary at compile time.
/// Users can write it out with:  morse-kana --write-config
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml.example");

// ── CLI ───────────────────────────────────────────────────────────────────────
#[derive(Parser, Debug, Default)]
#[command(
    name        = "morse-kana",
    about       = "Morse code translator  |  Latin, Wabun (kana), numerals",
    version,
)]
pub struct Cli {
    /// Text to translate (Morse tokens with --decode). Reads stdin when empty.
    pub text: Vec<String>,

    /// Config file path (default: ~/.config/morse-kana/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Decode Morse tokens instead of encoding text
    #[arg(short, long, action)]
    pub decode: bool,

    /// Alphabet: en | ja | auto (auto picks ja when the input holds kana)
    #[arg(short, long)]
    pub mode: Option<ModeArg>,

    /// JSON or TOML file with { en, ja, number } tables (default: built-in)
    #[arg(long)]
    pub tables: Option<PathBuf>,

    /// Token emitted for untranslatable input (default: #)
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Drop untranslatable input instead of emitting a placeholder
    #[arg(long, action)]
    pub skip_unknown: bool,

    /// Exit non-zero if any character or token could not be translated
    #[arg(long, action)]
    pub strict: bool,

    /// Print the active tables as JSON and exit
    #[arg(long, action)]
    pub dump_tables: bool,

    /// Write the built-in default config.toml to the config path and exit.
    /// Use --config <PATH> to write to a custom location.
    #[arg(long, action)]
    pub write_config: bool,

    /// Print the built-in default config.toml to stdout and exit
    #[arg(long, action)]
    pub print_config: bool,
}

// ── Enums shared across CLI + TOML ────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModeArg { Auto, En, Ja }

impl ModeArg {
    /// Concrete mode for this input
    pub fn resolve(self, input: &str) -> Mode {
        match self {
            ModeArg::Auto => Mode::detect(input),
            ModeArg::En   => Mode::En,
            ModeArg::Ja   => Mode::Ja,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy { Placeholder, Skip }

// ── TOML file structure ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub general: Option<GeneralCfg>,
    pub tables:  Option<TablesCfg>,
    pub output:  Option<OutputCfg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralCfg {
    pub mode: Option<ModeArg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesCfg {
    /// Empty string means built-in tables
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputCfg {
    pub unknown:     Option<UnknownPolicy>,
    pub placeholder: Option<String>,
    pub strict:      Option<bool>,
}

// ── Resolved / merged config ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mode:        ModeArg,
    /// None → built-in tables
    pub tables:      Option<PathBuf>,
    pub unknown:     UnknownPolicy,
    pub placeholder: String,
    pub strict:      bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode:        ModeArg::Auto,
            tables:      None,
            unknown:     UnknownPolicy::Placeholder,
            placeholder: DEFAULT_PLACEHOLDER.into(),
            strict:      false,
        }
    }
}

// ── Config loader ─────────────────────────────────────────────────────────────
impl AppConfig {
    /// Write the embedded default config to disk.
    /// Returns the path it was written to.
    pub fn write_default_config(cli: &Cli) -> Result<PathBuf> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating config directory {:?}", parent))?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Writing config to {:?}", path))?;
        Ok(path)
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        // 1. Load TOML file
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Reading config {:?}", path))?;
            let fc: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("Parsing config {:?}", path))?;
            cfg.apply_file(&fc);
        } else if cli.config.is_some() {
            bail!("Config file {} does not exist", path.display());
        } else {
            log::debug!("[config] no config file at {}, using defaults", path.display());
        }

        // 2. Apply CLI overrides
        cfg.apply_cli(cli);
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_file(&mut self, fc: &FileConfig) {
        if let Some(g) = &fc.general {
            if let Some(v) = g.mode { self.mode = v; }
        }
        if let Some(t) = &fc.tables {
            if let Some(v) = &t.path {
                self.tables = if v.is_empty() { None } else { Some(PathBuf::from(v)) };
            }
        }
        if let Some(o) = &fc.output {
            if let Some(v) = o.unknown      { self.unknown     = v; }
            if let Some(v) = &o.placeholder { self.placeholder = v.clone(); }
            if let Some(v) = o.strict       { self.strict      = v; }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = cli.mode         { self.mode        = v; }
        if let Some(v) = &cli.tables      { self.tables      = Some(v.clone()); }
        if let Some(v) = &cli.placeholder { self.placeholder = v.clone(); }
        if cli.skip_unknown               { self.unknown     = UnknownPolicy::Skip; }
        if cli.strict                     { self.strict      = true; }
    }

    fn validate(&self) -> Result<()> {
        self.fallback()
            .validate()
            .context("Invalid placeholder (use --skip-unknown to drop unknown symbols)")
    }

    pub fn fallback(&self) -> Fallback {
        match self.unknown {
            UnknownPolicy::Placeholder => Fallback::Placeholder(self.placeholder.clone()),
            UnknownPolicy::Skip        => Fallback::Skip,
        }
    }
}

fn default_config_path() -> PathBuf {
    dirs_next().join("morse-kana").join("config.toml")
}

fn dirs_next() -> PathBuf {
    if let Ok(v) = std::env::var("XDG_CONFIG_HOME") { return PathBuf::from(v); }
    if let Ok(v) = std::env::var("APPDATA")          { return PathBuf::from(v); }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default();
    PathBuf::from(home).join(".config")
}
