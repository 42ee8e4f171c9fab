//! Unified diff rendering for golden comparisons
//!
//! Both inputs are split into lines (every line is treated as ending in a
//! line break, so text ending in `\n` carries a trailing empty line), diffed
//! line by line with `similar` and grouped into hunks with a fixed number of
//! context lines. The report leads with the byte and line deltas between
//! expected and actual.

use colored::Colorize;
use similar::{DiffTag, TextDiff};
use std::fmt;
use std::ops::Range;

use crate::error::{GoldenError, GoldenResult};

/// Kind of an annotated report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `--- Expected` / `+++ Actual`
    Header,
    /// `@@ -a,b +c,d @@`
    Hunk,
    /// Unchanged line shown for context
    Context,
    /// Present in actual only
    Added,
    /// Present in expected only
    Removed,
}

/// One line of a diff report, including its leading tag character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    pub text: String,
}

impl DiffLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn colorized(&self) -> String {
        match self.text.chars().next() {
            Some('+') => self.text.green().to_string(),
            Some('-') => self.text.red().to_string(),
            Some('@') => self.text.yellow().to_string(),
            _ => self.text.clone(),
        }
    }
}

/// Result of comparing expected against actual bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    byte_delta: i64,
    line_delta: i64,
    lines: Vec<DiffLine>,
}

impl DiffReport {
    /// `len(actual) - len(expected)`
    pub fn byte_delta(&self) -> i64 {
        self.byte_delta
    }

    /// Line count of actual minus line count of expected
    pub fn line_delta(&self) -> i64 {
        self.line_delta
    }

    /// Annotated diff lines in render order
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// True when the inputs split into identical line sequences
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of added lines
    pub fn added_count(&self) -> usize {
        self.count(LineKind::Added)
    }

    /// Number of removed lines
    pub fn removed_count(&self) -> usize {
        self.count(LineKind::Removed)
    }

    /// Number of hunks
    pub fn hunk_count(&self) -> usize {
        self.count(LineKind::Hunk)
    }

    fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }

    /// Render the report, colorizing by tag when `color` is set
    ///
    /// Colorizing goes through `colored`, which emits plain text when the
    /// terminal has no color support.
    pub fn render_text(&self, color: bool) -> String {
        let mut output = format!(
            "Bytes/Lines: {:+}/{:+}\n",
            self.byte_delta, self.line_delta
        );
        for line in &self.lines {
            if color {
                output.push_str(&line.colorized());
            } else {
                output.push_str(&line.text);
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(false))
    }
}

/// Compare `expected` with `actual` and build a unified diff report
///
/// `context` is the number of unchanged lines kept around each change.
pub fn render(expected: &[u8], actual: &[u8], context: usize) -> GoldenResult<DiffReport> {
    let expected_text = String::from_utf8_lossy(expected);
    let actual_text = String::from_utf8_lossy(actual);
    let a = split_lines(&expected_text);
    let b = split_lines(&actual_text);

    let text_diff = TextDiff::from_slices(&a, &b);
    let mut lines = Vec::new();
    for group in text_diff.grouped_ops(context) {
        if group.iter().all(|op| op.tag() == DiffTag::Equal) {
            continue;
        }
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        if lines.is_empty() {
            lines.push(DiffLine::new(LineKind::Header, "--- Expected"));
            lines.push(DiffLine::new(LineKind::Header, "+++ Actual"));
        }
        lines.push(DiffLine::new(
            LineKind::Hunk,
            format!(
                "@@ -{} +{} @@",
                format_range(first.old_range().start, last.old_range().end),
                format_range(first.new_range().start, last.new_range().end)
            ),
        ));

        for op in &group {
            let (tag, old, new) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => push_lines(&mut lines, LineKind::Context, ' ', slice(&a, old)?),
                DiffTag::Delete => push_lines(&mut lines, LineKind::Removed, '-', slice(&a, old)?),
                DiffTag::Insert => push_lines(&mut lines, LineKind::Added, '+', slice(&b, new)?),
                DiffTag::Replace => {
                    push_lines(&mut lines, LineKind::Removed, '-', slice(&a, old)?);
                    push_lines(&mut lines, LineKind::Added, '+', slice(&b, new)?);
                }
            }
        }
    }

    Ok(DiffReport {
        byte_delta: actual.len() as i64 - expected.len() as i64,
        line_delta: b.len() as i64 - a.len() as i64,
        lines,
    })
}

/// Split on `\n`; a trailing line break yields a final empty line
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, length),
    }
}

fn slice<'a, 'b>(lines: &'a [&'b str], range: Range<usize>) -> GoldenResult<&'a [&'b str]> {
    lines.get(range.clone()).ok_or_else(|| {
        GoldenError::diff(format!(
            "diff range {}..{} outside {} lines",
            range.start,
            range.end,
            lines.len()
        ))
    })
}

fn push_lines(out: &mut Vec<DiffLine>, kind: LineKind, tag: char, lines: &[&str]) {
    out.extend(
        lines
            .iter()
            .map(|line| DiffLine::new(kind, format!("{}{}", tag, line))),
    );
}
