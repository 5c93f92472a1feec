//! Line-oriented checker for full-line block comment markers.
//!
//! A marker is a line that is nothing but a block comment opener
//! (`////...` or `/****...`) or closer (`****.../`). Each marker must be
//! indented to the current brace depth, carry no trailing spaces and span
//! exactly the configured width. Depth is tracked with a running counter
//! bumped by lines that hold a lone `{` or `}`; the host language is never
//! parsed.

use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_INDENT_STEP: usize = 4;
pub const DEFAULT_MARKER_WIDTH: usize = 80;

/// Layout rules a marker line is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRules {
    /// Spaces added per `{` line and removed per `}` line.
    pub indent_step: usize,
    /// Exact character count required of every marker line.
    pub width: usize,
}

impl Default for MarkerRules {
    fn default() -> Self {
        MarkerRules {
            indent_step: DEFAULT_INDENT_STEP,
            width: DEFAULT_MARKER_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

/// A single defect found on a marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Indentation { expected: i64, found: usize },
    TrailingSpace,
    Width { expected: usize, actual: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Indentation { expected, found } => write!(
                f,
                "incorrect number of leading spaces (expected {}, found {})",
                expected, found
            ),
            Violation::TrailingSpace => write!(f, "trailing space(s) present"),
            Violation::Width { expected, actual } => {
                write!(f, "line length is not {} ({})", expected, actual)
            }
        }
    }
}

/// Violations of one file keyed by 1-based line number, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    lines: BTreeMap<usize, Vec<Violation>>,
}

impl FileReport {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines with at least one violation.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn violation_count(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    pub fn get(&self, line: usize) -> Option<&[Violation]> {
        self.lines.get(&line).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Violation])> {
        self.lines.iter().map(|(n, v)| (*n, v.as_slice()))
    }

    /// Rendered violation descriptions per line.
    pub fn messages(&self) -> BTreeMap<usize, Vec<String>> {
        self.lines
            .iter()
            .map(|(n, v)| (*n, v.iter().map(ToString::to_string).collect()))
            .collect()
    }

    fn record(&mut self, line: usize, violations: Vec<Violation>) {
        if !violations.is_empty() {
            self.lines.insert(line, violations);
        }
    }
}

/// `true` for a trimmed line that opens a block: all slashes, or one slash
/// followed by asterisks.
pub fn is_start_marker(trimmed: &str) -> bool {
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.bytes().all(|b| b == b'/') {
        return true;
    }
    trimmed
        .strip_prefix('/')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b == b'*'))
}

/// `true` for a trimmed line of asterisks closed by a single slash.
pub fn is_end_marker(trimmed: &str) -> bool {
    trimmed
        .strip_suffix('/')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b == b'*'))
}

/// Strips the ASCII whitespace set (space, `\t`, `\n`, `\r`, `\x0b`, `\x0c`).
/// Non-ASCII spaces such as U+00A0 are content.
fn trim_ascii_whitespace(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\u{b}')
}

pub fn classify_marker(trimmed: &str) -> Option<MarkerKind> {
    if is_start_marker(trimmed) {
        Some(MarkerKind::Start)
    } else if is_end_marker(trimmed) {
        Some(MarkerKind::End)
    } else {
        None
    }
}

/// Checks one marker line against `rules`. Only the `\n` terminator is
/// dropped before measuring; everything else counts toward the width.
pub fn inspect_marker(line: &str, expected_indent: i64, rules: &MarkerRules) -> Vec<Violation> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let mut violations = Vec::new();

    let leading = line.len() - line.trim_start_matches(' ').len();
    if i64::try_from(leading).map_or(true, |found| found != expected_indent) {
        violations.push(Violation::Indentation {
            expected: expected_indent,
            found: leading,
        });
    }

    if line.ends_with(' ') {
        violations.push(Violation::TrailingSpace);
    }

    let actual = line.chars().count();
    if actual != rules.width {
        violations.push(Violation::Width {
            expected: rules.width,
            actual,
        });
    }

    violations
}

/// Runs the marker checks over `lines` in order. Line numbers start at 1.
pub fn analyse_lines<I, S>(lines: I, rules: &MarkerRules) -> FileReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let step = i64::try_from(rules.indent_step).unwrap_or(i64::MAX);
    let mut indent: i64 = 0;
    let mut desync_seen = false;
    let mut report = FileReport::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_num = idx + 1;
        let raw = line.as_ref();
        let trimmed = trim_ascii_whitespace(raw);

        match trimmed {
            "{" => {
                indent = indent.saturating_add(step);
                continue;
            }
            "}" => {
                indent = indent.saturating_sub(step);
                if indent < 0 && !desync_seen {
                    desync_seen = true;
                    tracing::debug!(line = line_num, indent, "brace depth went negative");
                }
                continue;
            }
            _ => {}
        }

        if classify_marker(trimmed).is_some() {
            report.record(line_num, inspect_marker(raw, indent, rules));
        }
    }

    report
}

/// Splits `text` on `\n` and analyses the resulting lines.
pub fn analyse_source(text: &str, rules: &MarkerRules) -> FileReport {
    analyse_lines(text.split_inclusive('\n'), rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_marker(width: usize) -> String {
        format!("/{}", "*".repeat(width - 1))
    }

    fn end_marker(width: usize) -> String {
        format!("{}/", "*".repeat(width - 1))
    }

    fn messages_for(text: &str) -> BTreeMap<usize, Vec<String>> {
        analyse_source(text, &MarkerRules::default()).messages()
    }

    #[test]
    fn recognises_marker_shapes() {
        assert!(is_start_marker("/"));
        assert!(is_start_marker(&"/".repeat(80)));
        assert!(is_start_marker("/*"));
        assert!(is_start_marker(&start_marker(80)));
        assert!(is_end_marker("*/"));
        assert!(is_end_marker(&end_marker(80)));

        assert!(!is_start_marker(""));
        assert!(!is_start_marker("//*"));
        assert!(!is_start_marker("/* comment"));
        assert!(!is_start_marker("*/"));
        assert!(!is_end_marker("/"));
        assert!(!is_end_marker("**//"));
        assert!(!is_end_marker("** /"));
        assert_eq!(classify_marker("/***"), Some(MarkerKind::Start));
        assert_eq!(classify_marker("***/"), Some(MarkerKind::End));
        assert_eq!(classify_marker("int x;"), None);
    }

    #[test]
    fn clean_full_width_markers_produce_no_entries() {
        let text = format!(
            "{}\n{}\n{}\n",
            "/".repeat(80),
            start_marker(80),
            end_marker(80)
        );
        assert!(analyse_source(&text, &MarkerRules::default()).is_empty());
    }

    #[test]
    fn indentation_follows_brace_lines() {
        let text = format!(
            "void f()\n{{\n    {}\n    {}\n}}\n{}\n",
            start_marker(76),
            end_marker(76),
            start_marker(80)
        );
        assert!(messages_for(&text).is_empty());
    }

    #[test]
    fn wrong_indent_is_reported_with_expected_and_found() {
        let text = format!("{{\n  {}\n}}\n", "/".repeat(78));
        let messages = messages_for(&text);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[&2],
            vec!["incorrect number of leading spaces (expected 4, found 2)"]
        );
    }

    #[test]
    fn trailing_space_also_breaks_width() {
        let text = format!("{} \n", end_marker(80));
        let messages = messages_for(&text);
        assert_eq!(
            messages[&1],
            vec!["trailing space(s) present", "line length is not 80 (81)"]
        );
    }

    #[test]
    fn short_marker_reports_only_width() {
        let text = format!("{}\n", start_marker(75));
        let messages = messages_for(&text);
        assert_eq!(messages[&1], vec!["line length is not 80 (75)"]);
    }

    #[test]
    fn all_three_checks_accumulate_in_order() {
        let report = analyse_source(" /** \n", &MarkerRules::default());
        assert_eq!(
            report.get(1),
            Some(
                &[
                    Violation::Indentation {
                        expected: 0,
                        found: 1
                    },
                    Violation::TrailingSpace,
                    Violation::Width {
                        expected: 80,
                        actual: 5
                    },
                ][..]
            )
        );
        assert_eq!(report.violation_count(), 3);
        assert_eq!(report.line_count(), 1);
    }

    #[test]
    fn brace_and_plain_lines_never_appear() {
        let text = "{\n  {  \n}\nint x = 1; /* note */\n// comment\n   }\n{\n";
        assert!(messages_for(text).is_empty());
    }

    #[test]
    fn file_without_markers_is_clean_even_when_unbalanced() {
        let text = "{\n{\n{\nreturn;\n";
        assert!(messages_for(text).is_empty());
    }

    #[test]
    fn unbalanced_closing_brace_skews_expectation() {
        let text = format!("}}\n{}\n", "/".repeat(80));
        let messages = messages_for(&text);
        assert_eq!(
            messages[&2],
            vec!["incorrect number of leading spaces (expected -4, found 0)"]
        );
    }

    #[test]
    fn carriage_return_counts_toward_width() {
        let text = format!("{}\r\n", start_marker(80));
        let messages = messages_for(&text);
        assert_eq!(messages[&1], vec!["line length is not 80 (81)"]);
    }

    #[test]
    fn custom_rules_change_step_and_width() {
        let rules = MarkerRules {
            indent_step: 2,
            width: 40,
        };
        let text = format!("{{\n  {}\n}}\n{}\n", end_marker(38), start_marker(39));
        let messages = analyse_source(&text, &rules).messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[&4], vec!["line length is not 40 (39)"]);
    }

    #[test]
    fn huge_indent_step_saturates_instead_of_wrapping() {
        let rules = MarkerRules {
            indent_step: usize::MAX,
            width: 80,
        };
        let messages = analyse_source("{\n{\n/***\n", &rules).messages();
        assert_eq!(
            messages[&3][0],
            format!(
                "incorrect number of leading spaces (expected {}, found 0)",
                i64::MAX
            )
        );

        let rules = MarkerRules {
            indent_step: i64::MAX as usize,
            width: 80,
        };
        let text = format!("{{\n{{\n{{\n}}\n}}\n}}\n}}\n}}\n}}\n{}\n", "/".repeat(80));
        let messages = analyse_source(&text, &rules).messages();
        assert_eq!(
            messages[&10],
            vec![format!(
                "incorrect number of leading spaces (expected {}, found 0)",
                i64::MIN
            )]
        );
    }

    #[test]
    fn only_ascii_whitespace_is_trimmed_for_classification() {
        let text = format!(
            "\u{a0}/{}\n\u{3000}}}\n\t{}\x0b\n",
            "*".repeat(79),
            "/".repeat(79)
        );
        let messages = messages_for(&text);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[&3], vec!["line length is not 80 (81)"]);
    }

    #[test]
    fn lines_without_terminator_are_accepted() {
        let lines = vec!["{".to_string(), format!("    {}", end_marker(76))];
        assert!(analyse_lines(&lines, &MarkerRules::default()).is_empty());
    }

    #[test]
    fn analysis_is_idempotent() {
        let text = format!("{{\n{}\n  {} \n}}\n", start_marker(70), end_marker(80));
        let rules = MarkerRules::default();
        assert_eq!(analyse_source(&text, &rules), analyse_source(&text, &rules));
    }

    #[test]
    fn report_iterates_in_ascending_line_order() {
        let text = format!("{}\nx\n{}\n", start_marker(10), end_marker(10));
        let report = analyse_source(&text, &MarkerRules::default());
        let lines: Vec<usize> = report.iter().map(|(n, _)| n).collect();
        assert_eq!(lines, vec![1, 3]);
    }
}
