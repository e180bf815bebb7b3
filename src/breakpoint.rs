// breakpoint module - interactive inspection loop entered after the fragments run

use crate::session::Session;
use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, BasicHistory, Input};
use std::io::{self, BufRead, IsTerminal, Write};

const PROMPT: &str = "(break)";

const HELP: &str = "\
commands:
  c, cont, continue     leave the breakpoint and finish the run
  q, quit, exit         abort the run
  vars, locals          list the variables in the session
  p, print <expr>       evaluate <expr> and show its value
  h, help               show this help
anything else is evaluated as rhai in the session";

/// source of breakpoint input lines
pub trait Prompt {
    /// read one line of input, `None` once input is exhausted
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// reads from the terminal, with line history when attended
pub struct TerminalPrompt {
    theme: ColorfulTheme,
    history: BasicHistory,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            history: BasicHistory::new().max_entries(200).no_duplicates(true),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        // dialoguer only works on a real terminal, piped input is read raw
        if !io::stdin().is_terminal() || !console::Term::stderr().is_term() {
            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            return Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()));
        }

        let line = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .history_with(&mut self.history)
            .interact_text()?;

        Ok(Some(line))
    }
}

/// how the invoker left the breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Continue,
    Quit,
}

/// one parsed line of breakpoint input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Empty,
    Continue,
    Quit,
    Vars,
    Help,
    Print(&'a str),
    Eval(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match (word, rest.is_empty()) {
            ("", _) => Command::Empty,
            ("c" | "cont" | "continue", true) => Command::Continue,
            ("q" | "quit" | "exit", true) => Command::Quit,
            ("vars" | "locals", true) => Command::Vars,
            ("h" | "help", true) => Command::Help,
            ("p" | "print", false) => Command::Print(rest),
            _ => Command::Eval(line),
        }
    }
}

/// the final pause: reads commands and evaluates them until told to leave
pub struct Breakpoint<P, W> {
    prompt: P,
    out: W,
}

impl<P: Prompt, W: Write> Breakpoint<P, W> {
    pub fn new(prompt: P, out: W) -> Self {
        Self { prompt, out }
    }

    /// suspend against `session` until the invoker continues or quits
    pub fn suspend(&mut self, session: &mut Session) -> Result<Resume> {
        writeln!(
            self.out,
            "{} {}",
            style("⏸  breakpoint").magenta().bold(),
            style("(type `help` for commands, `c` to continue)").dim()
        )?;

        loop {
            let Some(line) = self.prompt.read_line(PROMPT)? else {
                tracing::debug!("breakpoint input exhausted");
                return Ok(Resume::Quit);
            };

            match Command::parse(&line) {
                Command::Empty => {}
                Command::Continue => return Ok(Resume::Continue),
                Command::Quit => return Ok(Resume::Quit),
                Command::Help => writeln!(self.out, "{}", style(HELP).dim())?,
                Command::Vars => self.show_bindings(session)?,
                Command::Print(expr) => match session.execute(expr) {
                    Ok(value) => writeln!(self.out, "{value:?}")?,
                    Err(err) => self.show_error(&err)?,
                },
                Command::Eval(source) => match session.execute(source) {
                    Ok(value) if value.is_unit() => {}
                    Ok(value) => writeln!(self.out, "{value:?}")?,
                    Err(err) => self.show_error(&err)?,
                },
            }
        }
    }

    fn show_bindings(&mut self, session: &Session) -> Result<()> {
        let bindings = session.bindings();
        if bindings.is_empty() {
            writeln!(self.out, "{}", style("no variables defined").dim())?;
            return Ok(());
        }

        for binding in bindings {
            let keyword = if binding.constant { "const " } else { "" };
            writeln!(
                self.out,
                "{}{} = {:?} {}",
                keyword,
                style(&binding.name).cyan(),
                binding.value,
                style(format!("({})", binding.value.type_name())).dim()
            )?;
        }

        Ok(())
    }

    fn show_error(&mut self, err: &anyhow::Error) -> Result<()> {
        writeln!(self.out, "{} {}", style("❌").red(), style(err).red())?;
        Ok(())
    }

    /// hand back the output sink
    pub fn into_output(self) -> W {
        self.out
    }
}
