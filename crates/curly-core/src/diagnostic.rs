//! Diagnostic rendering for errors that carry a source location.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::Error;

impl Error {
    /// Render this error with ariadne.
    ///
    /// Returns the plain `Display` message when the error has no source
    /// location (post-parse sweep failures, I/O failures, programmatic
    /// `set_value` constraint violations).
    pub fn render(&self, source: &str) -> String {
        let Some((file_name, line, column)) = self.location() else {
            return self.to_string();
        };

        let offset = offset_of(source, line, column);
        let end = (offset + 1).min(source.len()).max(offset);
        let range = offset..end;

        let mut output = Vec::new();
        let report = Report::build(ReportKind::Error, (file_name, range.clone()))
            .with_message(self.to_string())
            .with_label(
                Label::new((file_name, range))
                    .with_message("here")
                    .with_color(Color::Red),
            )
            .finish();
        let _ = report.write((file_name, Source::from(source)), &mut output);
        String::from_utf8(output).unwrap_or_else(|_| self.to_string())
    }
}

/// Byte offset of a 1-based (line, column) position. Saturates at the end
/// of the line and at the end of the source.
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let mut current_line = 1;
    let mut offset = 0;

    if line > 1 {
        for (i, c) in source.char_indices() {
            if c == '\n' {
                current_line += 1;
                if current_line == line {
                    offset = i + 1;
                    break;
                }
            }
        }
        if current_line < line {
            return source.len();
        }
    }

    let rest = &source[offset..];
    let mut col = 1;
    for (i, c) in rest.char_indices() {
        if col == column || c == '\n' {
            return offset + i;
        }
        col += 1;
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseInfo;

    #[test]
    fn offset_maps_lines_and_columns() {
        let src = "ab\ncd\nef";
        assert_eq!(offset_of(src, 1, 1), 0);
        assert_eq!(offset_of(src, 1, 2), 1);
        assert_eq!(offset_of(src, 2, 1), 3);
        assert_eq!(offset_of(src, 3, 2), 7);
        // Past the end saturates instead of panicking.
        assert_eq!(offset_of(src, 9, 1), 8);
    }

    #[test]
    fn render_includes_message_and_file() {
        let source = "{cfg {intValue 200}}";
        let err = Error::ConstraintViolation {
            value: "200".into(),
            tag: "intValue".into(),
            info: Some(ParseInfo::new("app.curly", 1, 16)),
        };
        let rendered =
            String::from_utf8(strip_ansi_escapes::strip(err.render(source))).unwrap();
        assert!(rendered.contains("Invalid value: \"200\""));
        assert!(rendered.contains("app.curly"));
    }

    #[test]
    fn render_without_location_falls_back_to_display() {
        let err = Error::UndefinedMandatoryTag { name: "cfg".into() };
        assert_eq!(err.render(""), "Undefined mandatory tag: \"cfg\".");
    }
}
