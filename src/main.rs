mod calc;
mod store;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::calc::session::{CalcSession, Token};

#[derive(Parser, Debug)]
#[command(
    name = "timecalc",
    version,
    about = "Keypad-driven H:MM duration calculator"
)]
struct Cli {
    /// Session file to restore on start and save after every keypress.
    #[arg(long)]
    session: Option<PathBuf>,

    /// Run a token script headlessly and print the transcript instead of
    /// opening the GUI, e.g. --eval "1230 + 45 =".
    #[arg(long)]
    eval: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let session = match &cli.session {
        Some(path) if path.exists() => store::load_session(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        _ => CalcSession::new(),
    };

    if let Some(script) = &cli.eval {
        return run_script(session, script, cli.session.as_deref());
    }

    ui::app::run_gui(session, cli.session)
}

fn run_script(
    mut session: CalcSession,
    script: &str,
    session_file: Option<&Path>,
) -> Result<()> {
    for token in tokenize_script(script)? {
        session.press(token);
    }
    if let Some(path) = session_file {
        store::save_session(path, &session)?;
    }

    let transcript = session.output();
    if !transcript.is_empty() {
        println!("{}", transcript.trim_end_matches('\n'));
    }
    println!("input: {}", session.input());
    Ok(())
}

/// Splits a script into tokens. Whitespace separates words; `CE` is one
/// token, every other word is fed character by character so `1230` means
/// four digit presses.
fn tokenize_script(script: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for word in script.split_whitespace() {
        if let Some(token) = Token::from_label(word) {
            tokens.push(token);
            continue;
        }
        for c in word.chars() {
            match Token::from_char(c) {
                Some(token) => tokens.push(token),
                None => bail!("unknown token '{c}' in script"),
            }
        }
    }
    Ok(tokens)
}
