//! Interactive iteration shell
//!
//! A line-oriented session for stepping through iterators by hand:
//!
//! ```text
//! > let xs = [10, 20, 30]
//! > xs[Symbol.iterator]()
//! it1
//! > it1.next()
//! { value: 10, done: false }
//! ```
//!
//! Bound iterables live in an append-only table. Iterator handles keep a
//! detached `Cursor` plus the table slot they were obtained from, so
//! rebinding a name never disturbs iterators that are already running.

pub mod error;
pub mod lexer;
pub mod literal;

use std::collections::HashMap;
use std::fmt;

use regex::Regex;

use crate::iterable::ArrayIterable;
use crate::iterator::{Cursor, State};
use crate::value::{ArrayDisplay, Value};

pub use error::{ShellError, ShellResult};
pub use literal::parse_array_literal;

/// Identifier pattern shared by every command form
const IDENT: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";

/// Names that command forms claim, so `let` may not bind them
const RESERVED: &[&str] = &["help", "exit", "quit", "let", "const", "var", "for"];

pub const HELP: &str = "\
Commands:
  let NAME = [1, 'two', true]    bind an iterable over literals
  NAME                           show the bound sequence
  NAME[Symbol.iterator]()        obtain the default iterator
  NAME.values() | .keys() | .entries()
                                 obtain a specific iterator form
  itN.next()                     advance an iterator
  itN                            show an iterator's state
  [...NAME]                      spread into a new array
  for (const v of NAME)          print each element
  help                           show this text
  exit                           leave the shell";

/// Which iterator form a handle produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterKind {
    Values,
    Keys,
    Entries,
}

impl IterKind {
    fn from_method(method: Option<&str>) -> Self {
        match method {
            Some("keys") => IterKind::Keys,
            Some("entries") => IterKind::Entries,
            _ => IterKind::Values,
        }
    }
}

impl fmt::Display for IterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IterKind::Values => "values",
            IterKind::Keys => "keys",
            IterKind::Entries => "entries",
        };
        f.write_str(name)
    }
}

/// A produced element as printed by the shell
enum Produced<'a> {
    Value(&'a Value),
    Key(usize),
    Entry(usize, &'a Value),
}

impl fmt::Display for Produced<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Produced::Value(v) => write!(f, "{}", v),
            Produced::Key(k) => write!(f, "{}", k),
            Produced::Entry(k, v) => write!(f, "[ {}, {} ]", k, v),
        }
    }
}

/// A live iterator handed out by the session
#[derive(Debug, Clone)]
struct IterHandle {
    /// Binding name at the time the iterator was obtained
    source: String,
    /// Slot in the iterable table
    slot: usize,
    kind: IterKind,
    cursor: Cursor,
}

/// Outcome of evaluating one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print
    Silent,
    /// Text to print
    Text(String),
    /// The user asked to leave
    Exit,
}

/// Compiled command forms
struct Commands {
    bind: Regex,
    obtain: Regex,
    advance: Regex,
    spread: Regex,
    for_of: Regex,
    name: Regex,
}

impl Commands {
    fn new() -> ShellResult<Self> {
        Ok(Commands {
            bind: Regex::new(&format!(r"^let\s+({IDENT})\s*=\s*(.*)$"))?,
            obtain: Regex::new(&format!(
                r"^({IDENT})\s*(?:\[\s*Symbol\.iterator\s*\]|\.(values|keys|entries))\s*\(\s*\)$"
            ))?,
            advance: Regex::new(&format!(r"^({IDENT})\s*\.\s*next\s*\(\s*\)$"))?,
            spread: Regex::new(&format!(r"^\[\s*\.\.\.\s*({IDENT})\s*\]$"))?,
            for_of: Regex::new(&format!(
                r"^for\s*\(\s*(?:const|let|var)\s+({IDENT})\s+of\s+({IDENT})\s*\)$"
            ))?,
            name: Regex::new(&format!(r"^({IDENT})$"))?,
        })
    }
}

/// Shell session state
pub struct Session {
    commands: Commands,
    /// Every iterable ever bound, in binding order
    slots: Vec<ArrayIterable<Value>>,
    /// Current binding of each name
    bindings: HashMap<String, usize>,
    /// Iterator handles; `it1` is index 0
    iterators: Vec<IterHandle>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> ShellResult<Self> {
        Ok(Session {
            commands: Commands::new()?,
            slots: Vec::new(),
            bindings: HashMap::new(),
            iterators: Vec::new(),
        })
    }

    /// Evaluate one input line
    pub fn eval(&mut self, line: &str) -> ShellResult<Reply> {
        let line = line.trim().trim_end_matches(';').trim_end();

        if line.is_empty() || line.starts_with("//") {
            return Ok(Reply::Silent);
        }

        match line {
            "help" => return Ok(Reply::Text(HELP.to_string())),
            "exit" | "quit" => return Ok(Reply::Exit),
            _ => {}
        }

        if let Some(caps) = self.commands.bind.captures(line) {
            let name = caps[1].to_string();
            if RESERVED.contains(&name.as_str()) || parse_handle(&name).is_some() {
                return Err(ShellError::ReservedName(name));
            }
            let values = parse_array_literal(&caps[2])?;
            self.bind(name, values);
            return Ok(Reply::Silent);
        }

        if let Some(caps) = self.commands.obtain.captures(line) {
            let kind = IterKind::from_method(caps.get(2).map(|m| m.as_str()));
            let handle = self.obtain(&caps[1], kind)?;
            return Ok(Reply::Text(handle));
        }

        if let Some(caps) = self.commands.advance.captures(line) {
            let record = self.advance(&caps[1])?;
            return Ok(Reply::Text(record));
        }

        if let Some(caps) = self.commands.spread.captures(line) {
            let iterable = self.lookup(&caps[1])?;
            let spread: Vec<Value> = iterable.values().cloned().collect();
            return Ok(Reply::Text(ArrayDisplay(&spread).to_string()));
        }

        if let Some(caps) = self.commands.for_of.captures(line) {
            let iterable = self.lookup(&caps[2])?;
            if iterable.is_empty() {
                return Ok(Reply::Silent);
            }
            let lines: Vec<String> = iterable.values().map(ToString::to_string).collect();
            return Ok(Reply::Text(lines.join("\n")));
        }

        if self.commands.name.is_match(line) {
            return self.show(line).map(Reply::Text);
        }

        Err(ShellError::UnknownCommand(line.to_string()))
    }

    /// Evaluate a whole script, handing every printed reply to `emit`.
    ///
    /// Evaluation stops at the first failing line, whose 1-based number is
    /// attached to the error, or at `exit`. Lines after either are not run.
    pub fn run_script(&mut self, source: &str, mut emit: impl FnMut(&str)) -> ShellResult<()> {
        for (index, line) in source.lines().enumerate() {
            match self.eval(line) {
                Ok(Reply::Silent) => {}
                Ok(Reply::Text(text)) => emit(&text),
                Ok(Reply::Exit) => {
                    tracing::debug!(line = index + 1, "script exited early");
                    break;
                }
                Err(error) => {
                    return Err(ShellError::AtLine {
                        line: index + 1,
                        error: Box::new(error),
                    });
                }
            }
        }
        Ok(())
    }

    /// Bind `name` to a new iterable over `values`
    pub fn bind(&mut self, name: String, values: Vec<Value>) {
        let slot = self.slots.len();
        tracing::debug!(name = %name, len = values.len(), slot, "bound iterable");
        self.slots.push(ArrayIterable::new(values));
        self.bindings.insert(name, slot);
    }

    /// Obtain a fresh iterator over the iterable bound to `name`
    pub fn obtain(&mut self, name: &str, kind: IterKind) -> ShellResult<String> {
        let slot = self.slot_of(name)?;
        self.iterators.push(IterHandle {
            source: name.to_string(),
            slot,
            kind,
            cursor: Cursor::new(),
        });
        let handle = format!("it{}", self.iterators.len());
        tracing::debug!(handle = %handle, source = name, %kind, "obtained iterator");
        Ok(handle)
    }

    /// Advance the iterator named `handle`, returning the printed record
    pub fn advance(&mut self, handle: &str) -> ShellResult<String> {
        let index = self.handle_index(handle)?;
        let it = &mut self.iterators[index];
        let seq = self.slots[it.slot].as_slice();

        let produced = it.cursor.step(seq).map(|(i, v)| match it.kind {
            IterKind::Values => Produced::Value(v),
            IterKind::Keys => Produced::Key(i),
            IterKind::Entries => Produced::Entry(i, v),
        });
        if produced.is_done() {
            tracing::trace!(handle, "advance returned terminal record");
        }
        Ok(produced.to_string())
    }

    /// Number of iterator handles handed out so far
    pub fn iterator_count(&self) -> usize {
        self.iterators.len()
    }

    /// The iterable currently bound to `name`
    pub fn lookup(&self, name: &str) -> ShellResult<&ArrayIterable<Value>> {
        let slot = self.slot_of(name)?;
        Ok(&self.slots[slot])
    }

    fn slot_of(&self, name: &str) -> ShellResult<usize> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| ShellError::UnknownBinding(name.to_string()))
    }

    fn handle_index(&self, handle: &str) -> ShellResult<usize> {
        parse_handle(handle)
            .filter(|&n| n <= self.iterators.len())
            .map(|n| n - 1)
            .ok_or_else(|| ShellError::UnknownIterator(handle.to_string()))
    }

    /// Render a binding or an iterator handle
    fn show(&self, name: &str) -> ShellResult<String> {
        if let Some(&slot) = self.bindings.get(name) {
            return Ok(ArrayDisplay(self.slots[slot].as_slice()).to_string());
        }

        let index = self
            .handle_index(name)
            .map_err(|_| ShellError::UnknownBinding(name.to_string()))?;
        let it = &self.iterators[index];
        let state = match it.cursor.state() {
            State::Active(i) => format!("active at {}", i),
            State::Exhausted => "exhausted".to_string(),
        };
        Ok(format!("[{} iterator over {}] {}", it.kind, it.source, state))
    }
}

/// Number in a handle name of the exact form `it<N>`, `N` without leading zeros
fn parse_handle(name: &str) -> Option<usize> {
    let digits = name.strip_prefix("it")?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_handle() {
        assert_eq!(parse_handle("it1"), Some(1));
        assert_eq!(parse_handle("it42"), Some(42));
        assert_eq!(parse_handle("it0"), None);
        assert_eq!(parse_handle("it01"), None);
        assert_eq!(parse_handle("it+1"), None);
        assert_eq!(parse_handle("it"), None);
        assert_eq!(parse_handle("xs"), None);
    }

    #[test]
    fn test_for_of_lines() {
        let mut session = Session::new().unwrap();
        session.eval("let xs = ['a', 2]").unwrap();
        assert_eq!(
            session.eval("for (const x of xs)").unwrap(),
            Reply::Text("'a'\n2".to_string())
        );
    }
}
