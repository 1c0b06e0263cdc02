//! Heuristic extractive summarization.
//!
//! Selects a small set of representative sentences from the input by
//! position, with a similarity guard that falls back to a word-boundary
//! head/tail excerpt when the selection fails to compress. Pure and
//! deterministic; no external calls.

use regex::Regex;

/// Inputs shorter than this (trimmed) are never summarized.
const MIN_SUMMARIZABLE_CHARS: usize = 100;

/// Sentence fragments at or below this length are noise, not sentences.
const MIN_SENTENCE_CHARS: usize = 15;

/// The closing sentence is only worth keeping above this length.
const MIN_CLOSING_CHARS: usize = 20;

/// A summary longer than this fraction of the original is too similar.
const SIMILARITY_RATIO: f64 = 0.7;

/// Word counts for the head/tail fallback excerpt.
const FALLBACK_HEAD_WORDS: usize = 40;
const FALLBACK_TAIL_WORDS: usize = 20;
const FALLBACK_MIN_WORDS: usize = 80;

pub const DEFAULT_MAX_SENTENCES: usize = 3;

/// Produce a shortened extractive summary of `text`, or return `text`
/// unchanged when there is nothing to gain (short input, too few
/// sentences, or an uncompressible word count).
pub fn summarize(text: &str, max_sentences: usize) -> String {
    if text.trim().chars().count() < MIN_SUMMARIZABLE_CHARS {
        return text.to_string();
    }

    let sentences = split_sentences(text);

    if sentences.len() <= max_sentences {
        return text.to_string();
    }

    // Selection order is priority order: opening sentence, then the
    // 25%/50%/75% positions, then the closing sentence.
    let mut selected: Vec<&str> = vec![sentences[0]];

    for position in [0.25, 0.5, 0.75] {
        let index = ((sentences.len() as f64 * position) as usize).min(sentences.len() - 1);
        let candidate = sentences[index];
        if !selected.contains(&candidate) {
            selected.push(candidate);
        }
    }

    let closing = sentences[sentences.len() - 1];
    if closing.chars().count() > MIN_CLOSING_CHARS && !selected.contains(&closing) {
        selected.push(closing);
    }

    selected.truncate(max_sentences);

    let summary = format!("{}.", selected.join(". "));

    // Similarity guard: a "summary" nearly as long as the source is not
    // a summary.
    if summary.chars().count() as f64 > text.chars().count() as f64 * SIMILARITY_RATIO {
        return head_tail_fallback(text);
    }

    summary
}

/// Split on sentence terminators and drop noise fragments.
fn split_sentences(text: &str) -> Vec<&str> {
    let terminators = Regex::new(r"[.!?]+").expect("Invalid regex");
    terminators
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// First 40 words and last 20 words of the original; originals of 80 words
/// or fewer cannot be meaningfully compressed and are returned unchanged.
fn head_tail_fallback(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() > FALLBACK_MIN_WORDS {
        let head = words[..FALLBACK_HEAD_WORDS].join(" ");
        let tail = words[words.len() - FALLBACK_TAIL_WORDS..].join(" ");
        format!("{head}... {tail}")
    } else {
        text.to_string()
    }
}
