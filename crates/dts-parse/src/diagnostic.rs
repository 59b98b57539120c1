//! Diagnostic rendering for parser errors.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::error::{ParseError, ParseErrorKind};

impl ParseError {
    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source
    /// context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();

        match &self.kind {
            ParseErrorKind::MalformedNodeLine => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("malformed node line")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("expected `{` on this line")
                            .with_color(Color::Red),
                    )
            }

            ParseErrorKind::MalformedPropertyLine => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("malformed property line")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("not a property statement")
                            .with_color(Color::Red),
                    )
                    .with_help("properties are written `name;` or `name = value;`")
            }

            ParseErrorKind::InvalidName(err) => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("invalid name: {}", err))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("declared here")
                            .with_color(Color::Red),
                    )
                    .with_help(
                        "names are 1-31 characters from [0-9a-zA-Z,._+-] for nodes \
                         (alphabetic first) or [0-9a-zA-Z,._+?#-] for properties",
                    )
            }

            ParseErrorKind::InvalidLabel(err) => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("invalid label: {}", err))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("declared here")
                            .with_color(Color::Red),
                    )
                    .with_help("labels are 1-31 characters from [0-9a-zA-Z_]")
            }

            ParseErrorKind::InvalidLine => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("invalid line")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("neither a node, a node end, nor a property")
                            .with_color(Color::Red),
                    )
            }

            ParseErrorKind::UnsupportedVersion => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("missing or unsupported version marker")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("expected `/dts-v1/;` before this line")
                            .with_color(Color::Red),
                    )
                    .with_help("the first significant line of a source file must be `/dts-v1/;`")
            }

            ParseErrorKind::UnclosedNode => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("unclosed node")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("node opened here")
                            .with_color(Color::Red),
                    )
                    .with_help("add a closing `};`")
            }

            ParseErrorKind::NestingTooDeep => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("nesting too deep")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("this node exceeds the nesting bound")
                            .with_color(Color::Red),
                    )
            }

            ParseErrorKind::MissingRootNode => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("document has no root node")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("input ends here")
                            .with_color(Color::Red),
                    )
            }

            ParseErrorKind::TrailingContent => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("content after the root node")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("unexpected content here")
                            .with_color(Color::Red),
                    )
                    .with_help("a document holds exactly one root node; nothing can follow it")
            }
        }
    }
}
