//! The accumulator state machine behind the keypad.
//!
//! One [`CalcSession`] holds the live input buffer, the running signed total
//! in minutes, the operator carried over from the previous commit, and the
//! transcript of everything committed so far. Tokens arrive one at a time via
//! [`CalcSession::press`]; every press yields a fresh [`Snapshot`] for the
//! presentation layer to render. Nothing in here can fail: malformed buffers
//! degrade to zero inside the parser.

use crate::calc::value::{format_time, parse_buffer};

/// Commit operator. The stored value is the sign applied to the *next*
/// parsed term, not the operator just pressed; the one-token lag is load
/// bearing for chained arithmetic.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Op {
    Add,
    Sub,
    Equals,
}

impl Op {
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Equals => "=",
        }
    }
}

/// One keypad press. The alphabet is closed; the presentation layer converts
/// button labels and script words before anything reaches the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Token {
    Digit(u8),
    Colon,
    Clear,
    Op(Op),
}

impl Token {
    pub fn from_label(label: &str) -> Option<Token> {
        match label {
            "CE" => Some(Token::Clear),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Token::from_char(c),
                    _ => None,
                }
            }
        }
    }

    pub fn from_char(c: char) -> Option<Token> {
        match c {
            '0'..='9' => Some(Token::Digit(c as u8 - b'0')),
            ':' => Some(Token::Colon),
            '+' => Some(Token::Op(Op::Add)),
            '-' => Some(Token::Op(Op::Sub)),
            '=' => Some(Token::Op(Op::Equals)),
            _ => None,
        }
    }
}

/// Immutable view of the two strings the presentation layer renders.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct CalcSession {
    input: String,
    output: String,
    total_minutes: i32,
    last_op: Op,
}

impl Default for CalcSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalcSession {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            total_minutes: 0,
            last_op: Op::Add,
        }
    }

    /// Rebuilds a session from previously saved fields.
    pub fn restore(input: String, output: String, total_minutes: i32, last_op: Op) -> Self {
        Self {
            input,
            output,
            total_minutes,
            last_op,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn total_minutes(&self) -> i32 {
        self.total_minutes
    }

    pub fn last_op(&self) -> Op {
        self.last_op
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }

    /// Replaces the input buffer with the digit and colon characters of
    /// `text`; everything else is dropped. This is the clipboard-paste path.
    pub fn replace_input(&mut self, text: &str) {
        self.input = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ':')
            .collect();
    }

    /// Applies one token and returns the resulting snapshot.
    pub fn press(&mut self, token: Token) -> Snapshot {
        match token {
            Token::Digit(d) => self.input.push(char::from(b'0' + d)),
            Token::Colon => self.input.push(':'),
            Token::Clear => {
                if !self.input.is_empty() {
                    // First CE only discards the buffer.
                    self.input.clear();
                } else {
                    // Second CE in a row resets the whole session.
                    self.total_minutes = 0;
                    self.last_op = Op::Add;
                    self.output.clear();
                }
            }
            Token::Op(op) => self.commit(op),
        }
        self.snapshot()
    }

    /// Finalizes the current buffer into a term and folds it into the total.
    fn commit(&mut self, op: Op) {
        let (hours, minutes) = parse_buffer(&self.input);
        // Totals past i32 minutes are out of scope; wrap instead of panic.
        let mut term = hours.wrapping_mul(60).wrapping_add(minutes);
        if self.last_op == Op::Sub {
            term = term.wrapping_neg();
        }
        self.last_op = op;
        self.total_minutes = self.total_minutes.wrapping_add(term);

        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(&format_time(hours, minutes));
        self.output.push(' ');
        self.output.push_str(op.symbol());

        if op == Op::Equals {
            let magnitude = self.total_minutes.wrapping_abs();
            let text = format_time(magnitude / 60, magnitude % 60)
                .trim()
                .to_string();
            self.output.push(' ');
            if self.total_minutes < 0 {
                self.output.push('-');
            }
            self.output.push_str(&text);
            self.output.push('\n');
            self.total_minutes = 0;
            // The trimmed result becomes the next buffer so the user can
            // keep chaining from it. Its sign is not carried over.
            self.input = text;
        } else {
            self.input.clear();
        }
    }
}
