// src/utils.rs
use chrono::{DateTime, Local};

const MAX_FILE_STEM_CHARS: usize = 60;

/// Split newline-delimited batch input into trimmed, non-empty lines.
pub fn parse_batch_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Blog titles: like [`parse_batch_lines`], with `#` lines treated as comments.
pub fn parse_blog_lines(input: &str) -> Vec<String> {
    parse_batch_lines(input)
        .into_iter()
        .filter(|line| !line.starts_with('#'))
        .collect()
}

/// Split a blog input line of the form `title | details`.
pub fn split_title_details(line: &str) -> (String, String) {
    match line.split_once('|') {
        Some((title, rest)) => {
            let details = rest.split('|').next().unwrap_or_default();
            (title.trim().to_string(), details.trim().to_string())
        }
        None => (line.trim().to_string(), String::new()),
    }
}

/// Make a title usable as a file name stem
pub fn safe_file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILE_STEM_CHARS)
        .collect();

    if stem.trim().is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}

/// `<safe-title>_<YYYYmmdd_HHMMSS>`
pub fn article_file_stem(title: &str, now: DateTime<Local>) -> String {
    format!("{}_{}", safe_file_stem(title), now.format("%Y%m%d_%H%M%S"))
}
