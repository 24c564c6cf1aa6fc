use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::Evaluation;

/// Slice of `text` from the first `{` to the last `}` inclusive
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Interpret generator output as an evaluation
///
/// Never fails: output that cannot be read yields a zero-score evaluation
/// carrying the reason and the raw text.
pub fn parse_evaluation(text: &str, timestamp: DateTime<Utc>) -> Evaluation {
    match try_parse_evaluation(text, timestamp) {
        Ok(evaluation) => evaluation,
        Err(reason) => {
            tracing::error!(error = %reason, "Failed to parse evaluation response");
            Evaluation::unparseable(reason, text, timestamp)
        }
    }
}

fn try_parse_evaluation(text: &str, timestamp: DateTime<Utc>) -> Result<Evaluation, String> {
    let object = extract_json_object(text).ok_or("No JSON found in response")?;

    let value: Value = match serde_json::from_str(object) {
        Ok(value) => value,
        Err(strict_err) => serde_json::from_str(&pythonic_to_json(object))
            .map_err(|_| format!("Invalid JSON: {}", strict_err))?,
    };

    let map = value.as_object().ok_or("Response JSON is not an object")?;

    let score = map
        .get("score")
        .and_then(score_from_value)
        .ok_or("Missing or non-numeric score")?;

    let feedback = match map.get("feedback") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let mut evaluation = Evaluation::new(score, feedback, timestamp);
    evaluation.missed_points = string_list(map.get("missed_points"));
    evaluation.suggestions = string_list(map.get("suggestions"));
    Ok(evaluation)
}

/// Accepts `85`, `85.5`, `"85"`, `"85/100"` or `"85%"`
fn score_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            let end = s
                .char_indices()
                .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
                .map(|(i, _)| i)
                .unwrap_or(s.len());
            s[..end].parse().ok()
        }
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Rewrite Python literal syntax into JSON
///
/// Handles single-quoted strings, `True`/`False`/`None`, and trailing commas.
fn pythonic_to_json(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                out.push('"');
                i += 1;
                while i < chars.len() {
                    let d = chars[i];
                    out.push(d);
                    i += 1;
                    if d == '\\' && i < chars.len() {
                        out.push(chars[i]);
                        i += 1;
                    } else if d == '"' {
                        break;
                    }
                }
            }
            '\'' => {
                out.push('"');
                i += 1;
                while i < chars.len() {
                    let d = chars[i];
                    i += 1;
                    match d {
                        '\\' if i < chars.len() => {
                            let escaped = chars[i];
                            i += 1;
                            if escaped == '\'' {
                                out.push('\'');
                            } else {
                                out.push('\\');
                                out.push(escaped);
                            }
                        }
                        '"' => out.push_str("\\\""),
                        '\'' => {
                            out.push('"');
                            break;
                        }
                        _ => out.push(d),
                    }
                }
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(',');
                }
                i += 1;
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match word.as_str() {
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    "None" => out.push_str("null"),
                    _ => out.push_str(&word),
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
