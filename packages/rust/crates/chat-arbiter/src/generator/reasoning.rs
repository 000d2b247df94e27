//! Removal of `<think>...</think>` reasoning spans from model output.

use std::sync::LazyLock;

use regex::Regex;

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

/// Open tag through the nearest close tag, across lines, case-sensitive.
static REASONING_SPAN: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"(?s)<think>.*?</think>"));

/// Delete every reasoning span and trim what remains.
#[must_use]
pub fn strip_reasoning(text: &str) -> String {
    REASONING_SPAN.replace_all(text, "").trim().to_string()
}
