use serde::Serialize;

/// Quality metrics for one piece of generated content. Derived purely from
/// the text, immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentMetrics {
    pub word_count: u64,
    pub readability_score: u8,
    pub structure_score: u8,
    pub overall_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Advisory improvement hint. Never feeds back into the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub priority: Priority,
    pub message: &'static str,
}

/// Score a block of generated content.
///
/// Total over all inputs: empty content scores `{0, 0, 50, 25}` rather than
/// erroring. Calling twice on the same input always yields the same metrics.
pub fn score_content(content: &str) -> ContentMetrics {
    let word_count = count_words(content);
    let readability_score = readability(content, word_count);
    let structure_score = structure(content);
    let overall = (u16::from(readability_score) + u16::from(structure_score) + 1) / 2;

    ContentMetrics {
        word_count,
        readability_score,
        structure_score,
        overall_score: overall.min(100) as u8,
    }
}

fn count_words(content: &str) -> u64 {
    content.split_whitespace().count() as u64
}

/// Readability from average sentence length, banded.
///
/// 15-20 words per sentence is the ideal band for long-form explanatory
/// prose; 10-25 is acceptable; anything outside is either too terse or too
/// run-on. Zero words pins to 0 so empty content ranks below bad content.
fn readability(content: &str, word_count: u64) -> u8 {
    if word_count == 0 {
        return 0;
    }
    let sentences = content
        .split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
        .max(1);

    let avg = word_count as f64 / sentences as f64;
    if (15.0..=20.0).contains(&avg) {
        90
    } else if (10.0..=25.0).contains(&avg) {
        75
    } else {
        60
    }
}

/// Structure from the presence of heading/list/callout markers, HTML or
/// markdown form. Base 50, bonuses sum to at most 100.
fn structure(content: &str) -> u8 {
    let mut score: u8 = 50;
    if has_h2(content) {
        score += 15;
    }
    if has_h3(content) {
        score += 15;
    }
    if has_list(content) {
        score += 10;
    }
    if has_quote(content) {
        score += 10;
    }
    score.min(100)
}

fn has_h2(content: &str) -> bool {
    content.contains("<h2") || lines_start_with(content, |l| l.starts_with("## "))
}

fn has_h3(content: &str) -> bool {
    content.contains("<h3") || lines_start_with(content, |l| l.starts_with("### "))
}

fn has_list(content: &str) -> bool {
    content.contains("<ul") || content.contains("<ol") || content.contains("<li")
        || lines_start_with(content, |l| {
            l.starts_with("- ")
                || l.starts_with("* ")
                // Ordered-list items start with a short number; longer
                // numeric prefixes are prose ("1984. That year...").
                || l.split_once(". ").is_some_and(|(n, _)| {
                    (1..=3).contains(&n.len()) && n.chars().all(|c| c.is_ascii_digit())
                })
        })
}

fn has_quote(content: &str) -> bool {
    content.contains("<blockquote") || lines_start_with(content, |l| l.starts_with("> "))
}

fn lines_start_with(content: &str, pred: impl Fn(&str) -> bool) -> bool {
    content.lines().any(|line| pred(line.trim_start()))
}

/// Produce ranked improvement suggestions for scored content.
///
/// Emission order is fixed (expand, simplify, structure, subsections) so
/// repeated calls over identical metrics render identically. Suggestions are
/// advisory and never alter the metrics themselves.
pub fn suggest_improvements(content: &str, metrics: &ContentMetrics) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if metrics.word_count < 300 {
        suggestions.push(Suggestion {
            priority: Priority::High,
            message: "Content is short for a topic section; expand with examples or supporting detail",
        });
    }
    if metrics.readability_score < 70 {
        suggestions.push(Suggestion {
            priority: Priority::Medium,
            message: "Shorten long sentences and simplify vocabulary to improve readability",
        });
    }
    if metrics.structure_score < 70 {
        suggestions.push(Suggestion {
            priority: Priority::Medium,
            message: "Add headings, lists, or callouts to break up the text",
        });
    }
    if !has_h3(content) {
        suggestions.push(Suggestion {
            priority: Priority::Low,
            message: "Add subsection headings to organize longer passages",
        });
    }

    suggestions
}
