//! Inline markup carried in narrative text.
//!
//! The backend writes log lines as HTML fragments such as
//! `<strong>GM:</strong> The door creaks.` This module turns them into inert
//! styled segments. Only bold and line-break tags carry meaning; any other
//! tag is dropped and its inner text kept.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text { text: String, bold: bool },
    LineBreak,
}

impl Segment {
    fn text(text: &str, bold: bool) -> Self {
        Segment::Text {
            text: unescape(text),
            bold,
        }
    }
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)[^>]*?(/?)\s*>")
            .expect("tag pattern is a valid regex")
    })
}

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"^\s*<(?:strong|b)\s*>\s*([^<:]{1,32}):\s*</(?:strong|b)\s*>\s*")
            .expect("label pattern is a valid regex")
    })
}

/// Split markup into segments. Adjacent text runs are not merged.
pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut bold_depth = 0usize;
    let mut last = 0;

    for caps in tag_regex().captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            segments.push(Segment::text(&input[last..whole.start()], bold_depth > 0));
        }
        last = whole.end();

        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let name = caps
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();

        match (name.as_str(), closing) {
            ("strong" | "b", false) => bold_depth += 1,
            ("strong" | "b", true) => bold_depth = bold_depth.saturating_sub(1),
            ("br", _) => segments.push(Segment::LineBreak),
            ("p" | "div", true) => segments.push(Segment::LineBreak),
            _ => {}
        }
    }

    if last < input.len() {
        segments.push(Segment::text(&input[last..], bold_depth > 0));
    }

    // Newlines in the source are line breaks too.
    segments
        .into_iter()
        .flat_map(split_newlines)
        .filter(|s| !matches!(s, Segment::Text { text, .. } if text.is_empty()))
        .collect()
}

fn split_newlines(segment: Segment) -> Vec<Segment> {
    match segment {
        Segment::Text { text, bold } if text.contains('\n') => {
            let mut out = Vec::new();
            for (i, part) in text.split('\n').enumerate() {
                if i > 0 {
                    out.push(Segment::LineBreak);
                }
                out.push(Segment::Text {
                    text: part.trim_end_matches('\r').to_string(),
                    bold,
                });
            }
            out
        }
        other => vec![other],
    }
}

/// Markup with all tags removed, line breaks as `\n`.
pub fn plain_text(input: &str) -> String {
    parse(input)
        .into_iter()
        .map(|s| match s {
            Segment::Text { text, .. } => text,
            Segment::LineBreak => "\n".to_string(),
        })
        .collect()
}

/// Remove a leading bold speaker label such as `<strong>GM:</strong>`.
///
/// Returns the input unchanged when the label is absent or names someone else.
pub fn strip_speaker_label<'a>(input: &'a str, speaker: &str) -> &'a str {
    match label_regex().captures(input) {
        Some(caps)
            if caps
                .get(1)
                .is_some_and(|m| m.as_str().trim().eq_ignore_ascii_case(speaker)) =>
        {
            caps.get(0).map_or(input, |m| &input[m.end()..])
        }
        _ => input,
    }
}

fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
