use crate::errors::AppError;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};

pub type Lines<'a> = Box<dyn Iterator<Item = io::Result<String>> + 'a>;

/// Supplies the raw lines of a statistics dump.
pub trait LineSource {
  fn lines(&mut self) -> Result<Lines<'_>, AppError>;
}

/// Runs a program that prints the statistics dump to stdout, such as `printstats <database>`.
#[derive(Debug, Clone)]
pub struct CommandSource {
  program: String,
  args: Vec<String>,
  working_directory: Option<PathBuf>,
}

/// Reads the statistics dump from a file, stdin, or memory.
#[derive(Debug)]
pub struct ReaderSource<R: BufRead> {
  reader: R,
}

/// The output of a running stats command.
///
/// Dropping this closes the pipe and waits on the child. A child whose output wasn't read to
/// the end is killed first.
struct CommandOutput {
  command: String,
  child: Child,
  lines: Option<io::Split<BufReader<ChildStdout>>>,
  reached_end: bool,
}

impl CommandSource {
  pub fn new<S: Into<String>>(program: S) -> Self {
    Self {
      program: program.into(),
      args: vec![],
      working_directory: None,
    }
  }

  pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn working_directory<P: Into<PathBuf>>(mut self, working_directory: P) -> Self {
    self.working_directory = Some(working_directory.into());
    self
  }

  fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect::<Vec<&str>>()
      .join(" ")
  }
}

impl LineSource for CommandSource {
  fn lines(&mut self) -> Result<Lines<'_>, AppError> {
    let command_line = self.command_line();
    let mut command = Command::new(&self.program);

    command
      .args(&self.args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::inherit());

    if let Some(working_directory) = &self.working_directory {
      command.current_dir(working_directory);
    }

    tracing::info!("Running `{}`.", command_line);

    let mut child = command
      .spawn()
      .map_err(|source| AppError::FailedToSpawnStatsCommand {
        command: command_line.clone(),
        source,
      })?;

    let Some(stdout) = child.stdout.take() else {
      let _ = child.kill();
      let _ = child.wait();

      return Err(AppError::StatsCommandHasNoOutput(command_line));
    };

    Ok(Box::new(CommandOutput {
      command: command_line,
      child,
      lines: Some(BufReader::new(stdout).split(b'\n')),
      reached_end: false,
    }))
  }
}

impl<R: BufRead> ReaderSource<R> {
  pub fn new(reader: R) -> Self {
    Self { reader }
  }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
  fn lines(&mut self) -> Result<Lines<'_>, AppError> {
    Ok(Box::new((&mut self.reader).split(b'\n').map(decode_line)))
  }
}

impl Iterator for CommandOutput {
  type Item = io::Result<String>;

  fn next(&mut self) -> Option<Self::Item> {
    let next_line = self.lines.as_mut()?.next();

    if next_line.is_none() {
      self.reached_end = true;
    }

    next_line.map(decode_line)
  }
}

impl Drop for CommandOutput {
  fn drop(&mut self) {
    drop(self.lines.take());

    if !self.reached_end {
      tracing::warn!(
        "Stopped reading `{}` before the end of its output. Killing it.",
        self.command
      );

      if let Err(error) = self.child.kill() {
        tracing::debug!("Failed to kill `{}`. Reason: {:?}", self.command, error);
      }
    }

    match self.child.wait() {
      Ok(status) if status.success() || !self.reached_end => {}
      Ok(status) => tracing::warn!("`{}` exited with {}.", self.command, status),
      Err(error) => tracing::error!(
        "Failed to wait on `{}`. Reason: {:?}",
        self.command,
        error
      ),
    }
  }
}

/// Nicks aren't guaranteed to be UTF-8, so invalid bytes are replaced rather than rejected.
fn decode_line(line: io::Result<Vec<u8>>) -> io::Result<String> {
  let line = line?;
  let line = String::from_utf8_lossy(&line);

  Ok(line.strip_suffix('\r').unwrap_or(&*line).to_string())
}
