//! Structural validation of generated HTML documents.
//!
//! Checks run in order:
//! - strip code-fence markers (```` ```html ```` and friends)
//! - keep only the last `<!DOCTYPE html>` document when several are present
//! - parse with an HTML5 parser and record parse errors
//! - require literal `</html>` and `</body>` closing tags
//!
//! The "keep the last document" step is a repair heuristic for models that
//! wrap the real document in explanatory preamble or repeat it. It assumes
//! the last occurrence is the most complete one, which is usually but not
//! always true.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::fmt;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*").expect("code fence pattern"));

static DOCTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<!doctype\s+html").expect("doctype pattern"));

/// Parse errors beyond this many are counted but not listed.
const MAX_LISTED_PARSE_ERRORS: usize = 3;

/// Why a candidate document was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    Empty,
    Parse { count: usize, first: Vec<String> },
    MissingClosingHtml,
    MissingClosingBody,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Empty => write!(f, "document is empty"),
            InvalidReason::Parse { count, first } => {
                write!(f, "{} parse error(s): {}", count, first.join("; "))
            }
            InvalidReason::MissingClosingHtml => write!(f, "missing </html>"),
            InvalidReason::MissingClosingBody => write!(f, "missing </body>"),
        }
    }
}

/// Outcome of [`HtmlValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlValidation {
    /// Candidate after fence stripping and truncation. Callers must use this, not the input.
    pub sanitized: String,
    /// Empty when the document is valid.
    pub reasons: Vec<InvalidReason>,
}

impl HtmlValidation {
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(|r| r.to_string()).collect()
    }

    /// `Ok(sanitized)` when valid, `Err(reasons)` otherwise.
    pub fn into_result(self) -> Result<String, Vec<InvalidReason>> {
        if self.reasons.is_empty() {
            Ok(self.sanitized)
        } else {
            Err(self.reasons)
        }
    }
}

/// Validator for poster documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlValidator;

impl HtmlValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, candidate: &str) -> HtmlValidation {
        let sanitized = sanitize(candidate);
        let mut reasons = Vec::new();

        if sanitized.is_empty() {
            reasons.push(InvalidReason::Empty);
        }

        let document = Html::parse_document(&sanitized);
        if !document.errors.is_empty() {
            reasons.push(InvalidReason::Parse {
                count: document.errors.len(),
                first: document
                    .errors
                    .iter()
                    .take(MAX_LISTED_PARSE_ERRORS)
                    .map(|e| e.to_string())
                    .collect(),
            });
        }

        let lowered = sanitized.to_ascii_lowercase();
        if !lowered.contains("</html>") {
            reasons.push(InvalidReason::MissingClosingHtml);
        }
        if !lowered.contains("</body>") {
            reasons.push(InvalidReason::MissingClosingBody);
        }

        HtmlValidation { sanitized, reasons }
    }
}

/// Strip code fences and keep only the last document when several doctypes are present.
pub fn sanitize(candidate: &str) -> String {
    let unfenced = CODE_FENCE.replace_all(candidate, "");
    let unfenced = unfenced.trim();

    let starts: Vec<usize> = DOCTYPE.find_iter(unfenced).map(|m| m.start()).collect();
    match starts.as_slice() {
        [_, .., last] => unfenced[*last..].trim().to_string(),
        _ => unfenced.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_A: &str = "<!DOCTYPE html>\n<html lang=\"en\"><head><title>A</title></head><body><p>first</p></body></html>";
    const DOC_B: &str = "<!DOCTYPE html>\n<html lang=\"en\"><head><title>B</title></head><body><p>second</p></body></html>";

    #[test]
    fn test_valid_document() {
        let v = HtmlValidator::new().validate(DOC_A);
        assert!(v.is_valid(), "{:?}", v.reasons);
        assert_eq!(v.sanitized, DOC_A);
    }

    #[test]
    fn test_code_fences_stripped() {
        let fenced = format!("```html\n{}\n```", DOC_A);
        let v = HtmlValidator::new().validate(&fenced);
        assert!(v.is_valid(), "{:?}", v.reasons);
        assert!(!v.sanitized.contains("```"));
    }

    #[test]
    fn test_two_documents_keep_last() {
        let joined = format!("{}\n{}", DOC_A, DOC_B);
        let v = HtmlValidator::new().validate(&joined);
        assert!(v.is_valid(), "{:?}", v.reasons);
        assert!(v.sanitized.starts_with("<!DOCTYPE html>"));
        assert!(v.sanitized.contains("second"));
        assert!(!v.sanitized.contains("first"));
    }

    #[test]
    fn test_preamble_before_nested_document_dropped() {
        let noisy = format!(
            "Here is your poster: <!doctype html> (draft)\n```html\n{}\n```",
            DOC_B
        );
        let v = HtmlValidator::new().validate(&noisy);
        assert!(v.is_valid(), "{:?}", v.reasons);
        assert_eq!(v.sanitized, DOC_B);
    }

    #[test]
    fn test_missing_closing_tags() {
        let truncated = "<!DOCTYPE html><html><head><title>x</title></head><body><p>cut off";
        let v = HtmlValidator::new().validate(truncated);
        assert!(v.reasons.contains(&InvalidReason::MissingClosingHtml));
        assert!(v.reasons.contains(&InvalidReason::MissingClosingBody));
    }

    #[test]
    fn test_parse_errors_reject_despite_closing_tags() {
        let stray = "<!DOCTYPE html><html><head><title>x</title></head><body></div></body></html>";
        let v = HtmlValidator::new().validate(stray);
        assert!(matches!(v.reasons.as_slice(), [InvalidReason::Parse { .. }]));
        assert!(v.into_result().is_err());
    }

    #[test]
    fn test_empty_candidate() {
        let v = HtmlValidator::new().validate("```\n```");
        assert!(v.reasons.contains(&InvalidReason::Empty));
        assert!(v.into_result().is_err());
    }
}
