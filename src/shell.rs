//! A line-based interactive front end for a `Treap<char>`.
//!
//! Every line holds one command:
//!
//! | command               | effect                                   |
//! |-----------------------|------------------------------------------|
//! | `insert c` or `1 c`   | inserts the character `c`                |
//! | `delete c` or `2 c`   | removes one occurrence of `c`            |
//! | `search c` or `3 c`   | reports whether `c` is present           |
//! | `print`               | prints the traversals                    |
//! | `exit` or `4`         | stops the loop                           |
//!
//! After each insert, delete, search, or print the in-order and pre-order traversals are written
//! as `key:priority` pairs, so both invariants can be checked by eye.

use crate::error::{Error, Result};
use crate::priority::{PrioritySource, RandomPriority};
use crate::treap::{Treap, Visit};
use rand::XorShiftRng;
use std::fmt::Display;
use std::io::{BufRead, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Insert(char),
    Delete(char),
    Search(char),
    Print,
    Exit,
}

/// Parses one input line. Returns `Ok(None)` for a blank line.
///
/// # Examples
/// ```
/// use treap_engine::shell::{parse_command, Command};
///
/// assert_eq!(parse_command("insert a").unwrap(), Some(Command::Insert('a')));
/// assert_eq!(parse_command("2 a").unwrap(), Some(Command::Delete('a')));
/// assert_eq!(parse_command("   ").unwrap(), None);
/// assert!(parse_command("insert ab").is_err());
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let command = match args.as_slice() {
        [] => return Ok(None),
        ["insert"] | ["1"] | ["delete"] | ["2"] | ["search"] | ["3"] => {
            return Err(Error::InvalidKey(String::new()));
        },
        ["insert", key] | ["1", key] => Command::Insert(parse_key(key)?),
        ["delete", key] | ["2", key] => Command::Delete(parse_key(key)?),
        ["search", key] | ["3", key] => Command::Search(parse_key(key)?),
        ["print"] => Command::Print,
        ["exit"] | ["4"] => Command::Exit,
        _ => return Err(Error::InvalidCommand(line.trim().to_string())),
    };
    Ok(Some(command))
}

/// Parses a key made of exactly one character.
pub fn parse_key(arg: &str) -> Result<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Ok(key),
        _ => Err(Error::InvalidKey(arg.to_string())),
    }
}

fn join<T>(visits: &[Visit<&T>]) -> String
where
    T: Display,
{
    visits
        .iter()
        .map(|visit| visit.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

pub struct Shell<R, W, P = RandomPriority<XorShiftRng>> {
    input: R,
    output: W,
    treap: Treap<char, P>,
}

impl<R, W, P> Shell<R, W, P>
where
    R: BufRead,
    W: Write,
    P: PrioritySource,
{
    pub fn new(input: R, output: W, treap: Treap<char, P>) -> Self {
        Shell {
            input,
            output,
            treap,
        }
    }

    /// Prints the starting tree, then executes commands until `exit` or the end of the input.
    /// Malformed lines are reported and skipped. Only I/O errors end the loop early.
    pub fn run(&mut self) -> Result<()> {
        self.print_traversals()?;
        let mut buffer = String::new();
        loop {
            buffer.clear();
            if self.input.read_line(&mut buffer)? == 0 {
                debug!("end of input");
                return Ok(());
            }
            match parse_command(&buffer) {
                Ok(Some(command)) => {
                    if !self.execute(command)? {
                        return Ok(());
                    }
                },
                Ok(None) => {},
                Err(err) => {
                    warn!("{}", err);
                    writeln!(self.output, "error: {}", err)?;
                },
            }
        }
    }

    /// Executes a single command. Returns `false` if the loop should stop.
    pub fn execute(&mut self, command: Command) -> Result<bool> {
        debug!("executing {:?}", command);
        match command {
            Command::Insert(key) => self.treap.insert(key),
            Command::Delete(key) => match self.treap.remove(&key) {
                Some(_) => writeln!(self.output, "'{}' found and deleted.", key)?,
                None => writeln!(self.output, "'{}' not found.", key)?,
            },
            Command::Search(key) => {
                if self.treap.contains(&key) {
                    writeln!(self.output, "'{}' found.", key)?;
                } else {
                    writeln!(self.output, "'{}' not found.", key)?;
                }
            },
            Command::Print => {},
            Command::Exit => return Ok(false),
        }
        self.print_traversals()?;
        Ok(true)
    }

    fn print_traversals(&mut self) -> Result<()> {
        writeln!(self.output, "in-order: {}", join(&self.treap.in_order()))?;
        writeln!(self.output, "pre-order: {}", join(&self.treap.pre_order()))?;
        Ok(())
    }

    pub fn treap(&self) -> &Treap<char, P> {
        &self.treap
    }

    pub fn into_inner(self) -> (W, Treap<char, P>) {
        (self.output, self.treap)
    }
}
