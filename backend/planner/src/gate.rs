//! Overlap Gate
//!
//! Cheap lexical check on model output before it is shown: rejects empty,
//! off-topic, or runaway-length completions. Not a semantic validator.

use std::collections::HashSet;

use serde::Serialize;

/// Thresholds for accepting a model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateThresholds {
    /// Minimum share of output tokens that must also occur in the input.
    pub min_overlap_ratio: f64,
    /// Maximum output/input character-length ratio.
    pub max_length_ratio: f64,
    /// Tokens shorter than this are ignored.
    pub min_token_len: usize,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            min_overlap_ratio: 0.4,
            max_length_ratio: 1.2,
            min_token_len: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    EmptyOutput,
    LowOverlap,
    TooLong,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::EmptyOutput => "empty_output",
            RejectReason::LowOverlap => "low_overlap",
            RejectReason::TooLong => "too_long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum GateVerdict {
    Accept,
    Reject(RejectReason),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapReport {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub overlap_count: usize,
    pub overlap_ratio: f64,
    pub length_ratio: f64,
    pub verdict: GateVerdict,
}

impl OverlapReport {
    pub fn accepted(&self) -> bool {
        self.verdict == GateVerdict::Accept
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlapGate {
    thresholds: GateThresholds,
}

impl OverlapGate {
    pub fn new(thresholds: GateThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }

    /// Score `output` against `input`.
    pub fn evaluate(&self, input: &str, output: &str) -> OverlapReport {
        let input_tokens = tokenize_for_overlap(input, self.thresholds.min_token_len);
        let output_tokens = tokenize_for_overlap(output, self.thresholds.min_token_len);

        let input_set: HashSet<&str> = input_tokens.iter().map(String::as_str).collect();
        let overlap_count = output_tokens
            .iter()
            .filter(|token| input_set.contains(token.as_str()))
            .count();

        let overlap_ratio = overlap_count as f64 / output_tokens.len().max(1) as f64;
        let length_ratio = output.chars().count() as f64 / input.chars().count().max(1) as f64;

        let verdict = if output_tokens.is_empty() {
            GateVerdict::Reject(RejectReason::EmptyOutput)
        } else if overlap_ratio < self.thresholds.min_overlap_ratio {
            GateVerdict::Reject(RejectReason::LowOverlap)
        } else if length_ratio > self.thresholds.max_length_ratio {
            GateVerdict::Reject(RejectReason::TooLong)
        } else {
            GateVerdict::Accept
        };

        OverlapReport {
            input_tokens: input_tokens.len(),
            output_tokens: output_tokens.len(),
            overlap_count,
            overlap_ratio,
            length_ratio,
            verdict,
        }
    }

    /// `true` when the original text should be shown instead of `output`.
    pub fn should_fallback(&self, input: &str, output: &str) -> bool {
        !self.evaluate(input, output).accepted()
    }
}

/// Lowercase, treat everything outside `[a-z0-9]` as a separator, and keep
/// tokens of at least `min_len` characters.
pub fn tokenize_for_overlap(text: &str, min_len: usize) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| token.len() >= min_len)
        .map(str::to_string)
        .collect()
}

/// Gate check with the default thresholds.
pub fn should_fallback_to_original(input: &str, output: &str) -> bool {
    OverlapGate::default().should_fallback(input, output)
}
