#![forbid(unsafe_code)]

//! Plain-text drawing of a form.
//!
//! One line per input: label, value box, indicator. Empty inputs show their
//! placeholder. A field with no rule gets no indicator.
//!
//! ```text
//! Please Sign Up:
//! Name:   [Ada                 ] ok
//! Email:  [Enter your email.   ] error
//! [Submit (disabled)] [Reset Form]
//! ```

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use formkit_core::Form;

use crate::driver::FieldSpec;

/// Display width of the value box, excluding brackets.
pub const BOX_WIDTH: usize = 20;

/// Draw `form` with the given heading and inputs.
#[must_use]
pub fn render_form(heading: &str, fields: &[FieldSpec], form: &Form) -> String {
    let schema = form.engine().schema();
    let label_width = fields
        .iter()
        .map(|f| UnicodeWidthStr::width(f.label.as_str()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![heading.to_owned()];
    for spec in fields {
        let value = form.value(&spec.name).unwrap_or_default();
        let shown = if value.is_empty() {
            spec.placeholder.clone()
        } else if spec.masked {
            "*".repeat(value.chars().count())
        } else {
            value
        };
        let indicator = match schema.rule_for(&spec.name) {
            None => "",
            Some(_) if form.field_is_valid(&spec.name) => " ok",
            Some(_) => " error",
        };
        lines.push(format!(
            "{} [{}]{indicator}",
            pad(&spec.label, label_width + 1),
            pad(&fit(&shown, BOX_WIDTH), BOX_WIDTH),
        ));
    }
    let submit = if form.is_valid() {
        "[Submit]"
    } else {
        "[Submit (disabled)]"
    };
    lines.push(format!("{submit} [Reset Form]"));
    lines.join("\n")
}

/// Right-pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut out = text.to_owned();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// Truncate `text` to `width` display columns, marking the cut with `…`.
fn fit(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Strip blank edge lines, common indentation and trailing whitespace.
#[must_use]
pub fn normalize_frame(frame: &str) -> String {
    let lines: Vec<&str> = frame.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);
    let body = &lines[start..end];
    let indent = body
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    body.iter()
        .map(|l| l.get(indent..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}
