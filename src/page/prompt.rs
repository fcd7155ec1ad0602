//! Line-driven interaction with the page: edit a sidebar field, analyze, reset, quit.

use super::Page;
use crate::collector::Field;
use crate::session::Session;
use std::io::{self, BufRead, Write};

pub const HELP: &str = "commands: <field> <value> | analyze (or empty line) | reset | fields | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze,
    Set { field: Field, raw: String },
    Reset,
    Fields,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) | (Some("analyze" | "a"), None) => Command::Analyze,
            (Some("quit" | "q" | "exit"), None) => Command::Quit,
            (Some("fields"), None) => Command::Fields,
            (Some("reset"), None) => Command::Reset,
            (Some("help"), None) => Command::Help,
            (Some(key), Some(raw)) => match Field::from_key(key) {
                Some(field) => Command::Set {
                    field,
                    raw: raw.to_string(),
                },
                None => Command::Unknown(key.to_string()),
            },
            (Some(other), None) => Command::Unknown(other.to_string()),
        }
    }
}

/// Render the page, then serve commands from `input` until `quit` or end of input.
/// Rejected readings leave the session's inputs unchanged.
pub fn run_prompt(
    page: &Page<'_>,
    session: &mut Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    page.render(out, session)?;
    writeln!(out, "{HELP}")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        match Command::parse(&line) {
            Command::Analyze => {
                session.analyze();
                page.render_state(out, session)?;
            }
            Command::Quit => return Ok(()),
            Command::Fields => page.render_sidebar(out, session.inputs())?,
            Command::Reset => {
                session.reset_inputs();
                page.render_sidebar(out, session.inputs())?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Set { field, raw } => {
                let spec = field.spec();
                match spec.parse(&raw).and_then(|v| session.set_input(field, v).map(|_| v)) {
                    Ok(v) => writeln!(out, "{} = {}", spec.label, spec.display(v))?,
                    Err(e) => writeln!(out, "rejected: {e}")?,
                }
            }
            Command::Unknown(word) => writeln!(out, "unknown command '{word}'; {HELP}")?,
        }
    }
}
