//! Reading and writing the textual automaton format.
//!
//! ```text
//! states{A, B, C}
//! finalStates{C}
//! startState{A}
//! alphabet{a, b}
//! totalTransitions = 3
//! A, a, A
//! A, a, B
//! B, b, C
//! #
//! ```
//!
//! Lines starting with `//` and blank lines are ignored, and a line starting
//! with `#` (such as `#//end of file`) ends the data. Tokens are ASCII alphanumeric or the reserved empty token `emp`.
//! Parsing never validates the automaton; that is the caller's job.

use crate::automaton::{Automaton, is_valid_token};
use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Default)]
struct Header {
    states: Option<Vec<String>>,
    final_states: Option<Vec<String>>,
    start: Option<Vec<String>>,
    alphabet: Option<Vec<String>>,
    total: Option<usize>,
}

impl Header {
    fn first_missing(&self) -> Option<&'static str> {
        if self.states.is_none() {
            Some("states")
        } else if self.final_states.is_none() {
            Some("finalStates")
        } else if self.start.is_none() {
            Some("startState")
        } else if self.alphabet.is_none() {
            Some("alphabet")
        } else if self.total.is_none() {
            Some("totalTransitions")
        } else {
            None
        }
    }
}

fn token(line: usize, raw: &str) -> Result<String> {
    let raw = raw.trim();
    if is_valid_token(raw) {
        Ok(raw.to_string())
    } else {
        Err(Error::malformed(line, format!("invalid token `{raw}`")))
    }
}

/// Parse the `{a, b, c}` body of a section. `{}` is an empty list.
fn token_list(line: usize, body: &str) -> Result<Vec<String>> {
    let inner = body
        .trim()
        .strip_suffix('}')
        .ok_or_else(|| Error::malformed(line, "section is missing its closing `}`"))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner.split(',').map(|raw| token(line, raw)).collect()
}

fn set_once<T>(slot: &mut Option<T>, value: T, line: usize, name: &str) -> Result<()> {
    if slot.is_some() {
        return Err(Error::malformed(line, format!("duplicate section `{name}`")));
    }
    *slot = Some(value);
    Ok(())
}

fn header_line(header: &mut Header, line: usize, text: &str) -> Result<()> {
    if let Some((name, body)) = text.split_once('{') {
        let name = name.trim();
        let tokens = token_list(line, body)?;
        return match name {
            "states" => set_once(&mut header.states, tokens, line, name),
            "finalStates" => set_once(&mut header.final_states, tokens, line, name),
            "startState" | "startStates" => {
                if tokens.len() != 1 {
                    return Err(Error::malformed(
                        line,
                        format!("expected exactly one start state, found {}", tokens.len()),
                    ));
                }
                set_once(&mut header.start, tokens, line, name)
            }
            "alphabet" => set_once(&mut header.alphabet, tokens, line, name),
            _ => Err(Error::malformed(line, format!("unknown section `{name}`"))),
        };
    }

    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| Error::malformed(line, format!("unrecognised line `{text}`")))?;
    let name = name.trim();
    if name != "totalTransitions" && name != "totalTrans" {
        return Err(Error::malformed(line, format!("unknown section `{name}`")));
    }
    let total = value
        .trim()
        .parse()
        .map_err(|err| Error::malformed(line, format!("bad transition count: {err}")))?;
    set_once(&mut header.total, total, line, name)
}

fn transition_line(line: usize, text: &str) -> Result<(String, String, String)> {
    let parts: Vec<&str> = text.split(',').collect();
    let [src, sym, dst] = parts.as_slice() else {
        return Err(Error::malformed(
            line,
            format!("expected `source, symbol, destination`, found {} fields", parts.len()),
        ));
    };
    Ok((token(line, src)?, token(line, sym)?, token(line, dst)?))
}

fn is_header(text: &str) -> bool {
    text.contains('{') || text.contains('=')
}

/// Parse an automaton from its textual description.
pub fn parse(input: &str) -> Result<Automaton> {
    let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
    let mut header = Header::default();
    let mut transitions = Vec::new();
    let mut last_line = 0;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        last_line = line;
        let text = raw.trim();
        if text.is_empty() || text.starts_with("//") {
            continue;
        }
        if text.starts_with('#') {
            break;
        }

        if transitions.is_empty() && is_header(text) {
            header_line(&mut header, line, text)?;
            continue;
        }
        if let Some(missing) = header.first_missing() {
            return Err(Error::malformed(line, format!("missing section `{missing}`")));
        }
        transitions.push(transition_line(line, text)?);
    }

    if let Some(missing) = header.first_missing() {
        return Err(Error::malformed(last_line, format!("missing section `{missing}`")));
    }

    let Header {
        states: Some(states),
        final_states: Some(final_states),
        start: Some(mut start),
        alphabet: Some(alphabet),
        total: Some(total),
    } = header
    else {
        return Err(Error::Internal("header checked complete".into()));
    };

    if total != transitions.len() {
        return Err(Error::malformed(
            last_line,
            format!("declared {total} transitions, found {}", transitions.len()),
        ));
    }

    let mut builder = Automaton::builder()
        .states(states)
        .alphabet(alphabet)
        .final_states(final_states);
    if let Some(start) = start.pop() {
        builder = builder.start(start);
    }
    for (src, sym, dst) in transitions {
        builder = builder.transition(src, sym, dst);
    }

    tracing::debug!(lines = last_line, "parsed automaton");
    Ok(builder.build())
}

/// Read and parse the textual description stored at `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<Automaton> {
    let input = std::fs::read_to_string(path)?;
    parse(&input)
}

impl FromStr for Automaton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

fn join<'a>(labels: impl IntoIterator<Item = &'a String>) -> String {
    labels
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the textual format. Labels produced by the algorithms may contain
/// braces and commas, so only automata with plain tokens read back.
impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "states{{{}}}", join(self.states()))?;
        writeln!(f, "finalStates{{{}}}", join(self.final_states()))?;
        writeln!(f, "startState{{{}}}", self.start())?;
        writeln!(f, "alphabet{{{}}}", join(self.alphabet()))?;
        writeln!(f, "totalTransitions = {}", self.transition_count())?;
        for (src, sym, dst) in self.transitions() {
            writeln!(f, "{src}, {sym}, {dst}")?;
        }
        writeln!(f, "#")
    }
}

/// Render an automaton as pretty-printed JSON.
pub fn to_json(automaton: &Automaton) -> Result<String> {
    Ok(serde_json::to_string_pretty(automaton)?)
}

/// Read an automaton from its JSON form. Like [`parse`], this does not validate.
pub fn from_json(input: &str) -> Result<Automaton> {
    Ok(serde_json::from_str(input)?)
}

/// Read the JSON form stored at `path`.
pub fn read_json_file(path: impl AsRef<Path>) -> Result<Automaton> {
    let input = std::fs::read_to_string(path)?;
    from_json(&input)
}
