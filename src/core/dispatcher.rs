use crate::core::export::{DataExporter, ExportFormat};
use crate::core::query::QueryEngine;
use crate::core::{Numeric, SchoolData, Storage};
use crate::utils::error::{Result, SchoolError};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const PROMPT: &str = "Enter command (Q to quit): ";
pub const NO_DATA: &str = "No data to display.";
pub const UNKNOWN_COMMAND: &str = "Unknown command.";

pub const INSTRUCTIONS: [&str; 6] = [
    "[S] <surname> - search students by surname.",
    "[T] <teacher surname> - list the students of a teacher.",
    "[C] <grade> - search students by grade.",
    "[B] <bus number> - search students by bus.",
    "[EXPORT] <JSON or XML> - export all data to a file.",
    "[Q] - quit.",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StudentSurname(String),
    TeacherSurname(String),
    Grade(Numeric),
    Bus(Numeric),
    Export(ExportFormat),
    Quit,
    Unknown(String),
}

fn required<'a>(arg: Option<&'a str>, usage: &str) -> Result<&'a str> {
    arg.ok_or_else(|| SchoolError::usage(format!("Usage: {}", usage)))
}

impl Command {
    /// Splits on whitespace and matches the verb case-insensitively.
    /// Arguments past the first are ignored.
    pub fn parse(line: &str) -> Result<Command> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().unwrap_or("").to_uppercase();
        let arg = tokens.next();

        let command = match verb.as_str() {
            "S" => Command::StudentSurname(required(arg, "S <surname>")?.to_string()),
            "T" => Command::TeacherSurname(required(arg, "T <teacher surname>")?.to_string()),
            "C" => Command::Grade(Numeric::parse(required(arg, "C <grade>")?)),
            "B" => Command::Bus(Numeric::parse(required(arg, "B <bus number>")?)),
            "EXPORT" => Command::Export(required(arg, "EXPORT <JSON|XML>")?.parse()?),
            "Q" => Command::Quit,
            _ => Command::Unknown(verb),
        };
        Ok(command)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reply {
    pub notices: Vec<String>,
    pub results: Vec<String>,
}

impl Reply {
    fn results(results: Vec<String>) -> Self {
        Self {
            notices: Vec::new(),
            results,
        }
    }

    fn notice(message: impl Into<String>) -> Self {
        Self {
            notices: vec![message.into()],
            results: Vec::new(),
        }
    }
}

/// Owns the snapshot and routes commands to queries or exports.
pub struct Dispatcher<S: Storage> {
    data: SchoolData,
    exporter: DataExporter<S>,
}

impl<S: Storage> Dispatcher<S> {
    pub fn new(data: SchoolData, exporter: DataExporter<S>) -> Self {
        Self { data, exporter }
    }

    pub fn data(&self) -> &SchoolData {
        &self.data
    }

    pub async fn execute(&self, command: &Command) -> Result<Reply> {
        let engine = QueryEngine::new(&self.data);

        let reply = match command {
            Command::StudentSurname(surname) => Reply::results(engine.by_student_surname(surname)),
            Command::TeacherSurname(surname) => Reply::results(engine.by_teacher_surname(surname)),
            Command::Grade(grade) => Reply::results(engine.by_grade(*grade)),
            Command::Bus(bus) => Reply::results(engine.by_bus(*bus)),
            Command::Export(format) => {
                let written = self.exporter.export(*format, &self.data).await?;
                Reply::notice(format!("Data exported to {}", written))
            }
            Command::Unknown(_) => Reply::notice(UNKNOWN_COMMAND),
            Command::Quit => Reply::default(),
        };
        Ok(reply)
    }

    /// Parses and runs one input line. `None` means the session should end.
    pub async fn handle_line(&self, line: &str) -> Option<Reply> {
        let command = match Command::parse(line) {
            Ok(Command::Quit) => return None,
            Ok(command) => command,
            Err(e) => return Some(Reply::notice(e.user_friendly_message())),
        };

        tracing::debug!("Dispatching {:?}", command);
        match self.execute(&command).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                tracing::error!("Command failed: {}", e);
                Some(Reply::notice(format!(
                    "❌ {} ({})",
                    e.user_friendly_message(),
                    e.recovery_suggestion()
                )))
            }
        }
    }
}

async fn write_instructions<W: AsyncWrite + Unpin>(output: &mut W) -> Result<()> {
    for line in INSTRUCTIONS {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    Ok(())
}

/// Prompt/response loop. Ends on `Q` or end of input and returns the
/// number of commands handled, not counting the final `Q`.
pub async fn run_session<S, R, W>(dispatcher: &Dispatcher<S>, mut input: R, mut output: W) -> Result<usize>
where
    S: Storage,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut handled = 0;

    write_instructions(&mut output).await?;
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            tracing::debug!("Input closed");
            break;
        }
        // Invalid UTF-8 is replaced rather than ending the session.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);

        let started = Instant::now();
        let Some(reply) = dispatcher.handle_line(line).await else {
            break;
        };
        let elapsed = started.elapsed();
        handled += 1;

        let mut text = String::new();
        for notice in &reply.notices {
            text.push_str(notice);
            text.push('\n');
        }
        if reply.results.is_empty() {
            text.push_str(NO_DATA);
            text.push('\n');
        } else {
            for result in &reply.results {
                text.push_str(result);
                text.push('\n');
            }
        }
        text.push_str(&format!("Search time: {} ms\n", elapsed.as_millis()));
        output.write_all(text.as_bytes()).await?;
        write_instructions(&mut output).await?;
    }

    output.flush().await?;
    Ok(handled)
}
