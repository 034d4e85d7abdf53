// src/main.rs  |  morse-kana  entry point
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, Cli};
use morse_kana::{MorseData, MorseLookup, UnknownSymbol};
use std::io::Read;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // ── --print-config  ───────────────────────────────────────────────────────
    if cli.print_config {
        print!("{}", config::DEFAULT_CONFIG_TOML);
        return Ok(());
    }

    // ── --write-config  ───────────────────────────────────────────────────────
    if cli.write_config {
        let path = AppConfig::write_default_config(&cli)?;
        println!("Config written to: {}", path.display());
        return Ok(());
    }

    // ── Load config + tables ──────────────────────────────────────────────────
    let cfg = AppConfig::load(&cli)?;
    let data = match &cfg.tables {
        Some(path) => MorseData::load(path)
            .with_context(|| format!("Loading Morse tables from {}", path.display()))?,
        None => MorseData::builtin().clone(),
    };
    let lookup = MorseLookup::new(data)
        .with_fallback(cfg.fallback())
        .context("Applying unknown-symbol policy")?;

    // ── --dump-tables  ────────────────────────────────────────────────────────
    if cli.dump_tables {
        println!("{}", lookup.data().to_json_pretty()?);
        return Ok(());
    }

    // ── Translate ─────────────────────────────────────────────────────────────
    let input = if cli.text.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Reading input from stdin")?;
        buf
    } else {
        cli.text.join(" ")
    };

    let unknown = if cli.decode {
        // Auto-detect on decode can only look at the tokens, which never hold
        // kana, so auto means en unless the user asks for ja.
        let mode = cfg.mode.resolve("");
        log::info!("[main] decoding in {mode} mode");
        let (text, unknown) = lookup.decode_checked(input.split_whitespace(), mode);
        println!("{text}");
        unknown
    } else {
        let mode = cfg.mode.resolve(&input);
        log::info!("[main] encoding in {mode} mode");
        let (tokens, unknown) = lookup.encode_checked(&input, mode);
        println!("{}", tokens.join(" "));
        unknown
    };

    if !unknown.is_empty() {
        report_unknown(&unknown);
        if cfg.strict {
            std::process::exit(1);
        }
    }
    Ok(())
}

fn report_unknown(unknown: &[UnknownSymbol]) {
    for u in unknown {
        log::warn!("untranslatable {u}");
    }
    eprintln!("{} symbol(s) could not be translated", unknown.len());
}
