//! Rendering parse failures as `miette` diagnostics.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tinypeg::{ErrorKind, Mismatch, Token};

use crate::{Code, Failure, Tiny};

/// A syntax or lexical error with its source attached.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tiny::syntax))]
pub struct SyntaxDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
    #[help]
    help: Option<String>,
    line: u32,
    column: u32,
}

fn found(token: &Token<'_, Tiny>) -> String {
    if token.is_eof() {
        "end of input".to_string()
    } else {
        format!("'{}'", token.text)
    }
}

/// The one-line message for `failure`, as printed by the driver.
pub fn message(failure: &Failure<'_>) -> String {
    let token = &failure.token;
    match failure.kind {
        ErrorKind::Generic(Mismatch::UnexpectedToken) => {
            format!("unexpected token {}", found(token))
        }
        ErrorKind::Generic(Mismatch::UnexpectedEof) => "unexpected end of input".to_string(),
        ErrorKind::Generic(Mismatch::ExpectedEof) => {
            format!("expected end of input, found {}", found(token))
        }
        ErrorKind::Specific(Code::MayFuncCall) => format!(
            "unexpected token {}, maybe you want a function call?",
            found(token)
        ),
        ErrorKind::Specific(code) => format!("{code}, found {}", found(token)),
        ErrorKind::Lexical(error) => error.to_string(),
        ErrorKind::RecursionLimit { limit, .. } => {
            format!("input is nested too deeply (limit {limit})")
        }
    }
}

impl SyntaxDiagnostic {
    /// Describes `failure` within `source`, named `name` in the report.
    pub fn new(name: impl AsRef<str>, source: &str, failure: &Failure<'_>) -> Self {
        let label = match failure.kind {
            ErrorKind::Lexical(_) => "invalid token",
            _ if failure.token.is_eof() => "input ends here",
            _ => "unexpected here",
        };
        let help = failure
            .expected
            .filter(|_| !matches!(failure.kind, ErrorKind::Lexical(_)))
            .map(|expected| format!("expected {expected}"));
        Self::at(name, source, &failure.token, message(failure), label, help)
    }

    /// A diagnostic for a lexical error token met outside of a parse.
    pub fn lexical(name: impl AsRef<str>, source: &str, token: &Token<'_, Tiny>) -> Option<Self> {
        let error = token.lex_error()?;
        Some(Self::at(name, source, token, error.to_string(), "invalid token", None))
    }

    fn at(
        name: impl AsRef<str>,
        source: &str,
        token: &Token<'_, Tiny>,
        message: String,
        label: &str,
        help: Option<String>,
    ) -> Self {
        Self {
            message,
            src: NamedSource::new(name, source.to_string()),
            span: (token.span.start, token.span.len()).into(),
            label: label.to_string(),
            help,
            line: token.line,
            column: token.column,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The `line:column: error: message` form used by plain-text output.
    pub fn brief(&self) -> String {
        format!("{}:{}: error: {}", self.line, self.column, self.message)
    }
}
