//! lined entrypoint: a small interactive shell built on the line editor.
//!
//! Demonstrates the full surface: interactive prompt with history recall,
//! reverse search and completion, history persistence across runs, and the
//! no-echo password prompt. Logs go to `lined.log`; the terminal belongs to
//! the prompt.

use anyhow::{Context, Result};
use clap::Parser;
use core_editor::{Editor, PromptError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info};

mod config;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lined", version, about = "Interactive line editor shell")]
struct Args {
    /// Optional configuration file path (overrides discovery of `lined.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// History file (overrides the configured path).
    #[arg(long = "history")]
    history: Option<PathBuf>,
    /// Ask for a secret first and report its length (no-echo prompt demo).
    #[arg(long = "password")]
    password: bool,
}

const COMMANDS: &[&str] = &["echo", "exit", "help", "history", "quit"];

fn main() -> Result<()> {
    // File logging (append worker on its own thread); stdout stays clean for
    // the prompt.
    let file_appender = tracing_appender::rolling::never(".", "lined.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    info!(target: "runtime", "startup");

    // Log panics before the terminal backend's Drop restores the tty.
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(target: "runtime.panic", ?info, "panic");
        default_panic(info);
    }));

    let args = Args::parse();
    let cfg = config::load_from(args.config)?;
    let history_path = args
        .history
        .or(cfg.history.file)
        .unwrap_or_else(config::default_history_path);

    let mut editor = Editor::new();
    match File::open(&history_path) {
        Ok(f) => match editor.read_history(BufReader::new(f)) {
            Ok(n) => {
                info!(target: "runtime", lines = n, file = %history_path.display(), "history_loaded");
            }
            Err(e) => error!(target: "runtime", error = %e, "history_load_failed"),
        },
        Err(_) => {
            info!(target: "runtime", file = %history_path.display(), "no_history_file");
        }
    }

    editor.set_completer(|prefix: &str| {
        if prefix.is_empty() {
            return Vec::new();
        }
        COMMANDS
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(|c| (*c).to_owned())
            .collect()
    });

    if args.password {
        match editor.password_prompt("secret: ") {
            Ok(secret) => println!("read {} code points", secret.chars().count()),
            Err(e) if e.is_eof() => {}
            Err(e) => return Err(e.into()),
        }
    }

    loop {
        match editor.prompt(&cfg.prompt.text) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.append_history(line);
                match line {
                    "exit" | "quit" => break,
                    "help" => println!("commands: {}", COMMANDS.join(" ")),
                    "history" => {
                        let n = editor.write_history(std::io::stdout().lock())?;
                        println!("{n} entries");
                    }
                    _ => println!("{line}"),
                }
            }
            Err(PromptError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                error!(target: "runtime", error = %e, "prompt_failed");
                return Err(e.into());
            }
        }
    }

    if let Some(dir) = history_path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create {}", dir.display()))?;
        }
    }
    let file = File::create(&history_path)
        .with_context(|| format!("create {}", history_path.display()))?;
    let mut writer = BufWriter::new(file);
    let n = editor.write_history(&mut writer)?;
    writer.flush()?;
    info!(target: "runtime", lines = n, file = %history_path.display(), "history_saved");
    Ok(())
}
