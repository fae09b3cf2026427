//! Line-oriented terminal front end.
//!
//! # Responsibility
//! - Parse one command per line and dispatch it as a list intent.
//! - Render the list after every mutating command.
//! - Answer alerts and confirmations on the same console.
//!
//! # Invariants
//! - Row numbers are 1-based positions among all rows, hidden ones included,
//!   so a number stays stable while a filter is active.

use shoplist_core::{IntentError, KeyValueStore, ListController, RowId, UserPrompt};
use std::io::{self, BufRead, Write};

pub const HELP_TEXT: &str = "\
commands:
  add <text>      add an item (updates the selected item while editing)
  edit <n>        select row n for editing
  rm <n>          remove row n (asks for confirmation)
  clear           remove every item
  filter [text]   show only rows containing text; empty shows all
  list            show the list
  exists <text>   check whether an item exists (ignoring case)
  reload          re-read the list from storage
  help            show this help
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit(usize),
    Remove(usize),
    Clear,
    Filter(String),
    List,
    Exists(String),
    Reload,
    Help,
    Quit,
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        // Blank text is passed through so the controller raises the alert.
        "add" | "a" => Command::Add(rest.to_string()),
        "edit" | "e" => Command::Edit(parse_row_number(rest)?),
        "rm" | "remove" => Command::Remove(parse_row_number(rest)?),
        "clear" => Command::Clear,
        "filter" | "f" => Command::Filter(rest.to_string()),
        "list" | "ls" => Command::List,
        "exists" => Command::Exists(rest.to_string()),
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

fn parse_row_number(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(format!("expected a row number starting at 1, got `{raw}`")),
    }
}

/// Terminal console used both for commands and for prompts.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Reads one line; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> UserPrompt for Console<R, W> {
    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.writer, "! {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        let _ = write!(self.writer, "{message} [y/N] ");
        let _ = self.writer.flush();
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// Runs the command loop until `quit` or end of input.
pub fn run<S, R, W>(list: &mut ListController<S>, console: &mut Console<R, W>) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    render(list, &mut console.writer)?;
    loop {
        write!(console.writer, "{}> ", prompt_label(list))?;
        console.writer.flush()?;
        let Some(line) = console.read_line()? else {
            writeln!(console.writer)?;
            return Ok(());
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(console.writer, "{message}")?;
                continue;
            }
        };
        if command == Command::Quit {
            return Ok(());
        }
        dispatch(list, console, command)?;
    }
}

fn dispatch<S, R, W>(
    list: &mut ListController<S>,
    console: &mut Console<R, W>,
    command: Command,
) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let result = match command {
        Command::Add(text) => list.submit(&text, console).map(|_| ()),
        Command::Edit(number) => match row_at(list, number) {
            Some(row) => list.select_for_edit(row),
            None => return no_such_row(console, number),
        },
        Command::Remove(number) => match row_at(list, number) {
            Some(row) => list.remove_row(row, console),
            None => return no_such_row(console, number),
        },
        Command::Clear => list.clear_all(),
        Command::Filter(text) => {
            list.filter(&text);
            Ok(())
        }
        Command::List => Ok(()),
        Command::Exists(text) => {
            return match list.exists(&text) {
                Ok(found) => writeln!(console.writer, "{}", if found { "yes" } else { "no" }),
                Err(err) => writeln!(console.writer, "error: {err}"),
            };
        }
        Command::Reload => list.initial_load().map(|_| ()),
        Command::Help => return writeln!(console.writer, "{HELP_TEXT}"),
        Command::Quit => return Ok(()),
    };

    match result {
        Ok(()) => render(list, &mut console.writer),
        // Already alerted, or declined on purpose.
        Err(err) if err.is_user_error() => Ok(()),
        Err(IntentError::RowNotFound(_)) => writeln!(console.writer, "row is gone; try `list`"),
        Err(err) => writeln!(console.writer, "error: {err}"),
    }
}

fn row_at<S: KeyValueStore>(list: &ListController<S>, number: usize) -> Option<RowId> {
    list.rendered().at(number - 1).map(|row| row.id)
}

fn no_such_row<R, W: Write>(console: &mut Console<R, W>, number: usize) -> io::Result<()> {
    writeln!(console.writer, "no row {number}")
}

fn prompt_label<S: KeyValueStore>(list: &ListController<S>) -> &'static str {
    list.affordances().submit.label()
}

fn render<S: KeyValueStore>(list: &ListController<S>, out: &mut impl Write) -> io::Result<()> {
    let snapshot = list.snapshot();
    if snapshot.rows.is_empty() {
        return writeln!(out, "(list is empty)");
    }
    for (index, row) in snapshot.rows.iter().enumerate() {
        if !row.visible {
            continue;
        }
        let marker = if row.editing { "*" } else { " " };
        writeln!(out, "{marker}{:>3}. {}", index + 1, row.text)?;
    }
    if snapshot.filter_visible && !snapshot.filter_text.is_empty() {
        writeln!(out, "    filter: {}", snapshot.filter_text)?;
    }
    Ok(())
}
