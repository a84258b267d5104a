// src/services/fallback.rs
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_RESPONSE: &str =
    "Thank you for your message. How else can I assist you with Orion's global technology services today?";

const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    (
        "services",
        "We offer several services including: AI Automation, Software Development, Management Consulting, Website Modernization, Data Analytics, and Training & Support. Each service is tailored to help businesses worldwide modernize and compete in the digital age.",
    ),
    (
        "ai",
        "Our AI automation services help businesses streamline operations, enhance customer experiences, and reduce operational costs through intelligent automation solutions.",
    ),
    (
        "software",
        "Our software development services include custom web applications, mobile apps, enterprise systems, and API integrations tailored to your specific business needs.",
    ),
    (
        "website",
        "We transform outdated websites into modern, responsive digital experiences with improved UX and SEO optimization.",
    ),
    (
        "consulting",
        "Our management consulting provides digital transformation strategies and technology implementation roadmaps for businesses globally.",
    ),
    (
        "contact",
        "You can reach us via email at info@oriontech.co.ke or by phone at +254 (0) 712 345 678.",
    ),
    (
        "location",
        "Our headquarters is in Nairobi, Kenya, but we operate globally to serve clients worldwide.",
    ),
];

#[derive(Debug, Error)]
pub enum FallbackTableError {
    #[error("failed to read fallback table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed fallback table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fallback table entry {0} has an empty keyword")]
    EmptyKeyword(usize),

    #[error("fallback table has an empty default response")]
    EmptyDefault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackEntry {
    pub keyword: String,
    pub response: String,
}

/// Ordered keyword table used when the completion provider cannot answer.
///
/// Keywords are matched as substrings of the case-folded message in table
/// order, and the first hit wins. The default response is returned when no
/// keyword matches, so `respond` never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTable {
    entries: Vec<FallbackEntry>,
    default: String,
}

#[derive(Deserialize)]
struct TableFile {
    entries: Vec<EntryFile>,
    default: String,
}

#[derive(Deserialize)]
struct EntryFile {
    keyword: String,
    response: String,
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FallbackTable {
    pub fn new(
        entries: impl IntoIterator<Item = (String, String)>,
        default: impl Into<String>,
    ) -> Result<Self, FallbackTableError> {
        let default = default.into();
        if default.trim().is_empty() {
            return Err(FallbackTableError::EmptyDefault);
        }

        let mut table = Vec::new();
        for (idx, (keyword, response)) in entries.into_iter().enumerate() {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(FallbackTableError::EmptyKeyword(idx));
            }
            table.push(FallbackEntry { keyword, response });
        }

        Ok(Self { entries: table, default })
    }

    /// The table shipped with the site.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES
                .iter()
                .map(|(keyword, response)| FallbackEntry {
                    keyword: keyword.to_string(),
                    response: response.to_string(),
                })
                .collect(),
            default: DEFAULT_RESPONSE.to_string(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FallbackTableError> {
        let file: TableFile = serde_json::from_str(json)?;
        Self::new(
            file.entries.into_iter().map(|e| (e.keyword, e.response)),
            file.default,
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FallbackTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn respond(&self, message: &str) -> &str {
        let normalized = message.to_lowercase();

        self.entries
            .iter()
            .find(|entry| normalized.contains(&entry.keyword))
            .map(|entry| entry.response.as_str())
            .unwrap_or(self.default.as_str())
    }

    pub fn default_response(&self) -> &str {
        &self.default
    }

    pub fn entries(&self) -> &[FallbackEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_ignores_case_and_surroundings() {
        let table = FallbackTable::builtin();
        let expected = table.entries()[0].response.clone();
        assert_eq!(table.respond("What SERVICES do you offer?"), expected);
        assert_eq!(table.respond("services"), expected);
    }

    #[test]
    fn first_matching_keyword_wins() {
        let table = FallbackTable::builtin();
        // "services" precedes "software" in the table.
        let reply = table.respond("software services");
        assert!(reply.starts_with("We offer several services"));
    }

    #[test]
    fn blank_input_gets_default() {
        let table = FallbackTable::builtin();
        assert_eq!(table.respond(""), DEFAULT_RESPONSE);
        assert_eq!(table.respond("   \t"), DEFAULT_RESPONSE);
    }

    #[test]
    fn custom_keywords_are_case_folded() {
        let table = FallbackTable::new(
            vec![("Pricing".to_string(), "It depends.".to_string())],
            "Ask me anything.",
        )
        .unwrap();
        assert_eq!(table.respond("what about PRICING?"), "It depends.");
        assert_eq!(table.respond("hello"), "Ask me anything.");
    }

    #[test]
    fn rejects_empty_default_and_keyword() {
        assert!(matches!(
            FallbackTable::new(Vec::new(), "  "),
            Err(FallbackTableError::EmptyDefault)
        ));
        assert!(matches!(
            FallbackTable::new(vec![(" ".to_string(), "x".to_string())], "d"),
            Err(FallbackTableError::EmptyKeyword(0))
        ));
    }

    #[test]
    fn parses_table_file() {
        let json = r#"{
            "entries": [
                {"keyword": "hours", "response": "We are open 9 to 5."},
                {"keyword": "open", "response": "Yes, we are open."}
            ],
            "default": "Sorry?"
        }"#;
        let table = FallbackTable::from_json(json).unwrap();
        assert_eq!(table.respond("are you open? what hours?"), "We are open 9 to 5.");
        assert_eq!(table.respond("hi"), "Sorry?");
    }

    #[test]
    fn loads_example_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fallback.example.json");
        let table = FallbackTable::load(path).unwrap();
        assert_eq!(table.entries().len(), 2);
        assert!(table.respond("contact?").contains("info@oriontech.co.ke"));
        assert!(matches!(
            FallbackTable::load("does-not-exist.json"),
            Err(FallbackTableError::Io(_))
        ));
    }
}
