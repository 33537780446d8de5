// Copyright 2026 Cornell University
// released under MIT License

use std::io::Write;

use clap::ColorChoice;
use codespan_reporting::diagnostic::{
    Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle, Severity,
};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::errors::RadixError;
use crate::ir::Job;

/// Severity of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

/// A label representing a part of the job file
#[derive(Debug, Clone, PartialEq, Eq)]
struct Label {
    message: Option<String>,
    range: (usize, usize),
}

impl Label {
    fn to_codespan_label(&self, fileid: usize) -> CodespanLabel<usize> {
        CodespanLabel::new(LabelStyle::Primary, fileid, self.range.0..self.range.1)
            .with_message(self.message.clone().unwrap_or_default())
    }
}

struct Diagnostic {
    title: String,
    message: String,
    level: Level,
    location: Option<(usize, Label)>,
}

impl Diagnostic {
    fn emit(&self, buffer: &mut Buffer, files: &SimpleFiles<String, String>) -> std::io::Result<()> {
        if let Some((fileid, label)) = &self.location {
            let severity = match self.level {
                Level::Error => Severity::Error,
                Level::Warning => Severity::Warning,
            };

            let diagnostic = CodespanDiagnostic::new(severity)
                .with_message(&self.message)
                .with_labels(vec![label.to_codespan_label(*fileid)]);

            let config = term::Config::default();
            term::emit(buffer, &config, files, &diagnostic).map_err(std::io::Error::other)?;
        } else {
            let color = match self.level {
                Level::Error => Color::Red,
                Level::Warning => Color::Yellow,
            };

            buffer.set_color(ColorSpec::new().set_bold(true).set_fg(Some(color)))?;
            write!(buffer, "{}", self.title)?;
            buffer.set_color(&ColorSpec::new())?;
            writeln!(buffer, ": {}", self.message)?;
        }
        Ok(())
    }
}

/// Collects and prints diagnostics for job files and pipeline errors
pub struct DiagnosticHandler {
    files: SimpleFiles<String, String>,
    error_string: String,
    /// `color_choice` indicates whether to emit error messages w/ ANSI colors
    color_choice: ColorChoice,
    /// Whether diagnostics are echoed to stderr (they are always recorded)
    print: bool,
}

impl Default for DiagnosticHandler {
    /// Default `DiagnosticHandler` does not emit colored error messages
    fn default() -> Self {
        Self::new(ColorChoice::Never, true)
    }
}

impl DiagnosticHandler {
    pub fn new(color_choice: ColorChoice, print: bool) -> Self {
        Self {
            files: SimpleFiles::new(),
            error_string: String::new(),
            color_choice,
            print,
        }
    }

    fn create_buffer(&self) -> Buffer {
        if self.color_choice == ColorChoice::Never {
            Buffer::no_color()
        } else {
            Buffer::ansi()
        }
    }

    pub fn add_file(&mut self, name: String, content: String) -> usize {
        self.files.add(name, content)
    }

    /// Everything emitted so far
    pub fn error_string(&self) -> &str {
        &self.error_string
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        let mut buffer = self.create_buffer();
        if let Err(e) = diagnostic.emit(&mut buffer, &self.files) {
            log::error!("failed to render diagnostic `{}`: {e}", diagnostic.message);
            return;
        }
        let msg = String::from_utf8_lossy(buffer.as_slice());
        self.error_string.push_str(&msg);
        if self.print {
            eprint!("{}", msg);
        }
    }

    /// Points at the location in the job file where JSON parsing failed
    pub fn emit_json_error(&mut self, fileid: usize, error: &serde_json::Error) {
        let message = error.to_string();
        let location = self
            .files
            .get(fileid)
            .ok()
            .and_then(|file| byte_offset(file.source(), error.line(), error.column()))
            .map(|(start, end)| {
                let label = Label {
                    message: Some(format!("{:?}", error.classify()).to_lowercase()),
                    range: (start, end),
                };
                (fileid, label)
            });
        self.emit(Diagnostic {
            title: "Error".to_string(),
            message,
            level: Level::Error,
            location,
        });
    }

    pub fn emit_radix_error(&mut self, error: &RadixError) {
        self.emit_general_message(&error.to_string(), Level::Error);
    }

    /// Warns about definitions that no signal refers to
    pub fn emit_unused_definitions(&mut self, job: &Job) {
        for definition in &job.definitions {
            let used = job
                .associations
                .iter()
                .any(|a| a.alias == definition.name());
            if !used {
                self.emit_general_message(
                    &format!("alias `{}` is not used by any signal", definition.name()),
                    Level::Warning,
                );
            }
        }
    }

    pub fn emit_general_message(&mut self, message: &str, level: Level) {
        self.emit(Diagnostic {
            title: format!("{:?}", level),
            message: message.to_string(),
            level,
            location: None,
        });
    }
}

/// Converts a 1-based line/column pair into a byte range of one character.
/// Returns `None` if the position is not known (line 0).
fn byte_offset(source: &str, line: usize, column: usize) -> Option<(usize, usize)> {
    if line == 0 {
        return None;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let mut start = (line_start + column.saturating_sub(1)).min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use strip_ansi_escapes::strip_str;

    use super::*;
    use crate::ir::{AliasDefinition, SignalAssociation, Target};

    #[test]
    fn offsets_from_line_and_column() {
        let src = "{\n  \"a\": 1,\n}\n";
        assert_eq!(byte_offset(src, 1, 1), Some((0, 1)));
        assert_eq!(byte_offset(src, 2, 3), Some((4, 5)));
        assert_eq!(byte_offset(src, 3, 1), Some((12, 13)));
        assert_eq!(byte_offset(src, 0, 0), None);
        // past the end of the file
        assert_eq!(byte_offset(src, 9, 9), Some((src.len(), src.len())));
    }

    #[test]
    fn json_error_points_into_file() {
        let source = "{\n  \"definitions\": [\n    {\"name\": \"state\" \"width\": 2}\n  ]\n}\n";
        let mut handler = DiagnosticHandler::new(ColorChoice::Never, false);
        let fileid = handler.add_file("job.json".to_string(), source.to_string());
        let err = serde_json::from_str::<Job>(source).unwrap_err();
        handler.emit_json_error(fileid, &err);

        let content = strip_str(handler.error_string());
        assert!(content.starts_with("error: expected `,` or `}`"), "{content}");
        assert!(content.contains("job.json:3:"), "{content}");
    }

    #[test]
    fn general_messages() {
        let mut handler = DiagnosticHandler::new(ColorChoice::Always, false);
        handler.emit_radix_error(&RadixError::UnsupportedViewer("simvision".to_string()));
        let content = strip_str(handler.error_string());
        assert_eq!(
            content,
            "Error: unsupported viewer `simvision` (expected one of: json, verdi, gtkwave)\n"
        );
    }

    #[test]
    fn unused_definitions_are_reported() {
        let job = Job {
            definitions: vec![
                AliasDefinition::new("state", 2, vec![]),
                AliasDefinition::new("opcode", 7, vec![]),
            ],
            associations: vec![SignalAssociation::new(
                "top.fsm.state".parse::<Target>().unwrap(),
                "state",
            )],
        };
        let mut handler = DiagnosticHandler::new(ColorChoice::Never, false);
        handler.emit_unused_definitions(&job);
        assert_eq!(
            handler.error_string(),
            "Warning: alias `opcode` is not used by any signal\n"
        );
    }
}
