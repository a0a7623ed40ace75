//! Interactive shell over one [`Session`].

use std::io::{self, BufRead, Write};

use chrono::Utc;
use medicines_core::SubmitRejected;
use tracing::debug;

use crate::api::MedicineApi;
use crate::session::Session;

pub const HELP_TEXT: &str = "\
Commands:
  list             reload the medicine list
  name <value>     set the name field
  price <value>    set the price field
  submit           add, or update when editing
  edit <name>      load a medicine into the form
  cancel           stop editing
  delete <name>    delete a medicine
  average          show the average price
  retry            reload after a failed load
  dismiss          close the notification
  help             show this help
  quit             leave the shell
";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Name(String),
    Price(String),
    Submit,
    Edit(String),
    Cancel,
    Delete(String),
    Average,
    Retry,
    Dismiss,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse a line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let argument = |usage: &str| {
            if rest.is_empty() {
                Err(format!("usage: {}", usage))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => ShellCommand::List,
            // Fields may be cleared, so the value is optional
            "name" => ShellCommand::Name(rest.to_string()),
            "price" => ShellCommand::Price(rest.to_string()),
            "submit" => ShellCommand::Submit,
            "edit" => ShellCommand::Edit(argument("edit <name>")?),
            "cancel" => ShellCommand::Cancel,
            "delete" | "rm" => ShellCommand::Delete(argument("delete <name>")?),
            "average" | "avg" => ShellCommand::Average,
            "retry" => ShellCommand::Retry,
            "dismiss" => ShellCommand::Dismiss,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{}', type `help`", other)),
        };
        Ok(Some(command))
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn run_shell<A, R, W>(session: &mut Session<A>, mut input: R, output: &mut W) -> io::Result<()>
where
    A: MedicineApi,
    R: BufRead,
    W: Write,
{
    session.refresh();
    write!(output, "{}", session.page_text(Utc::now()))?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "{}", message)?;
                continue;
            }
        };
        debug!(command = ?command, "shell command");

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                write!(output, "{}", HELP_TEXT)?;
                continue;
            }
            ShellCommand::List => {
                session.refresh();
            }
            ShellCommand::Retry => {
                session.retry();
            }
            ShellCommand::Name(value) => session.set_name(value),
            ShellCommand::Price(value) => session.set_price(value),
            ShellCommand::Submit => {
                if let Err(SubmitRejected::InFlight) = session.submit() {
                    writeln!(output, "A submission is already in progress.")?;
                }
            }
            ShellCommand::Edit(name) => {
                session.edit(&name);
            }
            ShellCommand::Cancel => session.cancel(),
            ShellCommand::Delete(name) => {
                let mut prompt_error = None;
                session.delete(&name, |prompt| {
                    match ask(&mut input, &mut *output, prompt) {
                        Ok(answer) => answer,
                        Err(err) => {
                            prompt_error = Some(err);
                            false
                        }
                    }
                });
                if let Some(err) = prompt_error {
                    return Err(err);
                }
            }
            ShellCommand::Average => {
                session.fetch_average();
            }
            ShellCommand::Dismiss => {
                session.dismiss_notification();
            }
        }

        write!(output, "{}", session.page_text(Utc::now()))?;
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Ask a yes/no question. Anything but `y`/`yes` declines.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;
    let answer = read_line(input)?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
