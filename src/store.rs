//! Session save/restore.
//!
//! The four session fields are written as versioned JSON so a later run can
//! pick up exactly where the user left off. Loading is strict about the
//! version and the operator token but tolerant of missing fields.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::json;

use crate::calc::session::{CalcSession, Op};

pub fn load_session(path: &Path) -> Result<CalcSession> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read session file {}", path.display()))?;
    parse_session_text(&content)
}

pub fn parse_session_text(content: &str) -> Result<CalcSession> {
    let raw = serde_json::from_str::<SessionFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported session file version {}; expected version 1",
            raw.version
        );
    }

    let last_op = match raw.last_op.as_str() {
        // The empty token is how a fresh session used to be saved.
        "+" | "" => Op::Add,
        "-" => Op::Sub,
        "=" => Op::Equals,
        other => bail!("unknown operator '{other}' in session file"),
    };

    Ok(CalcSession::restore(
        raw.input,
        raw.output,
        raw.total_minutes,
        last_op,
    ))
}

pub fn save_session(path: &Path, session: &CalcSession) -> Result<()> {
    let payload = json!({
        "version": 1,
        "input": session.input(),
        "output": session.output(),
        "total_minutes": session.total_minutes(),
        "last_op": session.last_op().symbol(),
    });
    let text = serde_json::to_string_pretty(&payload)?;
    fs::write(path, format!("{text}\n"))
        .with_context(|| format!("unable to write session file {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SessionFile {
    version: u32,
    #[serde(default)]
    input: String,
    #[serde(default)]
    output: String,
    #[serde(default)]
    total_minutes: i32,
    #[serde(default = "default_last_op")]
    last_op: String,
}

fn default_last_op() -> String {
    "+".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_session() {
        let json = r#"
{
  "version": 1,
  "input": "45",
  "output": " 12:30 +",
  "total_minutes": 750,
  "last_op": "+"
}
"#;
        let session = parse_session_text(json).expect("valid session");
        assert_eq!(session.input(), "45");
        assert_eq!(session.output(), " 12:30 +");
        assert_eq!(session.total_minutes(), 750);
        assert_eq!(session.last_op(), Op::Add);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let session = parse_session_text(r#"{ "version": 1 }"#).expect("valid session");
        assert_eq!(session.input(), "");
        assert_eq!(session.output(), "");
        assert_eq!(session.total_minutes(), 0);
        assert_eq!(session.last_op(), Op::Add);
    }

    #[test]
    fn empty_operator_token_reads_as_add() {
        let session =
            parse_session_text(r#"{ "version": 1, "last_op": "" }"#).expect("valid session");
        assert_eq!(session.last_op(), Op::Add);
    }

    #[test]
    fn rejects_unsupported_version() {
        let err = parse_session_text(r#"{ "version": 2 }"#).expect_err("version 2 should fail");
        assert!(err.to_string().contains("unsupported session file version"));
    }

    #[test]
    fn rejects_unknown_operator() {
        let err = parse_session_text(r#"{ "version": 1, "last_op": "*" }"#)
            .expect_err("unknown operator should fail");
        assert!(err.to_string().contains("unknown operator"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_session_text("{ not-valid-json ").expect_err("bad json should fail");
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn save_and_parse_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let mut session = CalcSession::new();
        for c in "1230+".chars() {
            session.press(crate::calc::session::Token::from_char(c).expect("token"));
        }
        save_session(&path, &session).expect("save");

        let restored = load_session(&path).expect("load");
        assert_eq!(restored.input(), session.input());
        assert_eq!(restored.output(), session.output());
        assert_eq!(restored.total_minutes(), session.total_minutes());
        assert_eq!(restored.last_op(), session.last_op());
    }
}
