//! Deterministic text cleanup applied to every reply before storage and
//! display, regardless of which provider produced it.
//!
//! The pipeline strips math/markup artifacts that the upstream models leak
//! into prose answers. It is pure and idempotent: running it twice yields
//! the same output as running it once.

use regex::Regex;
use std::sync::LazyLock;

#[cfg(test)]
mod tests;

static MATH_DELIMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\(|\\\)|\\\[|\\\]").expect("valid regex"));
static SQUARE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]]").expect("valid regex"));
static BOXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\boxed\{([^}]+)\}").expect("valid regex"));
static TEXT_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\text\{([^}]+)\}").expect("valid regex"));
static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\frac\{([^}]+)\}\{([^}]+)\}").expect("valid regex"));
static TIMES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\times").expect("valid regex"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*").expect("valid regex"));
static ANSWER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\banswer:\s*").expect("valid regex"));
static QUOTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));
static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("valid regex"));
static LINE_EDGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]+|[ \t]+$").expect("valid regex"));

/// Verbs that mark a quoted span as an attributed direct quotation, which
/// must be preserved verbatim including its quote marks.
const QUOTE_ATTRIBUTION_VERBS: [&str; 3] = ["said", "wrote", "states"];

/// Clean provider markup out of `raw`.
///
/// Steps, in order: strip math delimiters, unwrap `\boxed{}`/`\text{}`,
/// rewrite `\frac{A}{B}` as `A/B`, replace `\times` with `x`, drop bold
/// markers and literal `Answer:` labels, unwrap non-attributed quotes,
/// collapse runs of blank lines, and trim whitespace.
pub fn normalize(raw: &str) -> String {
    let s = MATH_DELIMS.replace_all(raw, "");
    let s = BOXED.replace_all(&s, "$1");
    let s = TEXT_WRAPPER.replace_all(&s, "$1");
    let s = FRACTION.replace_all(&s, "$1/$2");
    let s = TIMES.replace_all(&s, "x");
    let s = SQUARE_BRACKETS.replace_all(&s, "");
    let s = BOLD.replace_all(&s, "");
    let s = ANSWER_LABEL.replace_all(&s, "");
    let s = QUOTED_SPAN.replace_all(&s, |caps: &regex::Captures| {
        let inner = &caps[1];
        if QUOTE_ATTRIBUTION_VERBS.iter().any(|v| inner.contains(v)) {
            caps[0].to_string()
        } else {
            inner.to_string()
        }
    });
    let s = EXCESS_BLANK_LINES.replace_all(&s, "\n\n");
    let s = LINE_EDGES.replace_all(&s, "");
    s.trim().to_string()
}
