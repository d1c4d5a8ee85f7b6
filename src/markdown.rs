//! Protocol documents are markdown-like text. This is a line-oriented
//! substitution pass, not a markdown parser: headings, bold, links, bullet
//! items, rules and paragraph breaks only.

use once_cell::sync::Lazy;
use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        pattern: Regex::new(pattern).unwrap_or_else(|err| panic!("invalid markdown rule {pattern}: {err}")),
        replacement,
    }
}

// Applied in order; list merging relies on items already being wrapped.
// Line rules run in CRLF mode so `\r\n` endings anchor like `\n`.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule(r"(?mR)^# (.*)$", "<h1>${1}</h1>"),
        rule(r"(?mR)^## (.*)$", "<h2>${1}</h2>"),
        rule(r"(?mR)^### (.*)$", "<h3>${1}</h3>"),
        rule(r"\*\*(.*)\*\*", "<strong>${1}</strong>"),
        rule(r"\[([^\]]+)\]\(([^)]+)\)", r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#),
        rule(r"(?mR)^\* (.*)$", "<ul><li>${1}</li></ul>"),
        rule(r"</ul>\r?\n<ul>", ""),
        rule(r"(?mR)^---$", "<hr>"),
        rule(r"\r?\n\r?\n", "<br><br>"),
    ]
});

pub fn render_markdown(text: &str) -> String {
    let mut html = text.to_string();
    for rule in RULES.iter() {
        html = rule.pattern.replace_all(&html, rule.replacement).into_owned();
    }
    html
}
