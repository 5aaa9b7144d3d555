//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors are rendered with [`ariadne`], pointing at the regions of the input that caused them.
//! Most kinds only need a message, one label per span, and an optional help line; those can use
//! [`simple_report`] to build their report.

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// Builds a report with the given message, attaching the `labels` to the `spans` in order.
///
/// Empty labels highlight their span without a message. If there are more spans than labels, the
/// extra spans are highlighted without a message. If there are no spans at all, the report points
/// at the start of the source.
pub fn simple_report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: impl ToString,
    labels: &[String],
    help: Option<String>,
) -> Report<'static, (&'a str, Range<usize>)> {
    let offset = spans.first().map_or(0, |span| span.start);
    let labels = spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let mut label = Label::new((src_id, span.clone())).with_color(EXPR);
            if let Some(message) = labels.get(i).filter(|message| !message.is_empty()) {
                label = label.with_message(message);
            }
            label
        })
        .collect::<Vec<_>>();

    let mut builder = Report::build(ReportKind::Error, src_id, offset)
        .with_message(message)
        .with_labels(labels);
    if let Some(help) = help {
        builder.set_help(help);
    }
    builder.finish()
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source.
    ///
    /// The `ariadne` crate's [`Report`] type does not implement `Display`, so the report is
    /// written into a buffer instead. Labels and highlighted expressions are colored, so the
    /// returned string contains ANSI escape codes.
    pub fn report_to_string(&self, input: &str) -> String {
        let mut buf = Vec::new();
        // writing into a `Vec` cannot fail
        let _ = self.build_report("input").write(("input", Source::from(input)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Report this error to stderr, highlighting the regions of `input` it originated from.
    pub fn report_to_stderr(&self, input: &str) {
        if let Err(err) = self.build_report("input").eprint(("input", Source::from(input))) {
            eprintln!("failed to print error report: {}", err);
        }
    }
}
