//! Error rendering using miette
//!
//! Every Stellar error is a `miette::Diagnostic`, so rendering shows its
//! stable code, message, help text and the chain of underlying causes.

use crate::Error;
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::io::Write;

/// Messages are short; keep each one on a single line.
const MAX_WIDTH: usize = 400;

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use stellar::{Bump, Engine, TreeBuilder, render_error};
///
/// let arena = Bump::new();
/// let b = TreeBuilder::new(&arena);
/// let engine = Engine::default();
///
/// if let Err(e) = engine.compile(b.int("12x")) {
///     render_error(&e.into());
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
///
/// This is useful when you want to control where the error is written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    render(error, true)
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error) -> String {
    render(error, false)
}

fn render(error: &Error, use_color: bool) -> String {
    let theme = if use_color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .with_width(MAX_WIDTH)
        .render_report(&mut out, error)
        .is_err()
    {
        // Fall back to the plain message.
        out = error.to_string();
    }
    out
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    writer.write_all(render(error, use_color).as_bytes())?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Bump, Engine, EngineOptions, EvalError, ExecutionOptions, ExpressionState,
        MapVariableResolver, TreeBuilder,
    };

    #[test]
    fn test_render_compile_error() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::default();

        let err: Error = engine.compile(b.long("12xL")).unwrap_err().into();
        let output = render_error_to_string_no_color(&err);

        assert!(output.contains("stellar::eval::invalid_literal"), "{output}");
        assert!(output.contains("Invalid LongLiteral `12xL`"), "{output}");
    }

    #[test]
    fn test_render_eval_error_with_help() {
        let arena = Bump::new();
        let b = TreeBuilder::new(&arena);
        let engine = Engine::new(EngineOptions {
            default_execution_options: ExecutionOptions {
                strict_variables: true,
            },
            ..EngineOptions::default()
        });
        let variables = MapVariableResolver::new();
        let state = ExpressionState::with_variables(&variables);

        let err = engine
            .execute(b.add(b.int("1"), b.variable("missing")), &state)
            .unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert!(output.contains("stellar::eval::unresolved_variable"), "{output}");
        assert!(output.contains("strict variable resolution"), "{output}");
    }

    #[test]
    fn test_render_to_writer() {
        let err = Error::Eval(EvalError::DivisionByZero);
        let mut buf = Vec::new();
        render_error_to(&err, &mut buf).unwrap();

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("Division by zero"), "{output}");
        assert!(output.ends_with('\n'));
    }
}
