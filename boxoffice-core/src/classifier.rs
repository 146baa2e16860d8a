//! Lexical intent detection over user messages.
//!
//! The router needs three cheap, model-free signals: did the user just
//! confirm a purchase, are they asking for suggestions in a known metro, and
//! does their message read like a search/price question. All of it is plain
//! word-boundary pattern matching, kept in one place so policy changes (a new
//! confirmation word, a new city) touch a single file.

use regex::Regex;

/// Canned query used by the suggestion shortcut; the matched metro keyword is
/// passed as the search location.
pub const SUGGESTION_QUERY: &str = "popular concerts";

/// Metro-area keywords recognized by the suggestion shortcut.
///
/// Longer phrases sort before their prefixes so the alternation matches the
/// most specific form.
pub const METRO_KEYWORDS: &[&str] = &[
    "new york city",
    "new york",
    "nyc",
    "brooklyn",
    "los angeles",
    "san francisco",
    "bay area",
    "las vegas",
    "san diego",
    "washington dc",
    "chicago",
    "boston",
    "seattle",
    "austin",
    "nashville",
    "miami",
    "dallas",
    "houston",
    "atlanta",
    "philadelphia",
    "philly",
    "denver",
    "phoenix",
    "toronto",
];

/// Compiled intent predicates.
///
/// Build one at startup and share it by reference; patterns are compiled
/// exactly once.
#[derive(Debug)]
pub struct IntentClassifier {
    confirmation: Regex,
    suggestion: Regex,
    search_intent: Regex,
    metro: Regex,
}

impl IntentClassifier {
    pub fn new() -> Self {
        // Word-boundary affirmatives that mean "go ahead with the purchase".
        let confirmation = Regex::new(concat!(
            r"(?i)\b(?:",
            r"let'?s do it|",
            r"do it|",
            r"go[ -]ahead|",
            r"yes|yeah|yep|sure|",
            r"ok(?:ay)?|",
            r"submit|buy|purchase|book|proceed",
            r")\b",
        ))
        .expect("confirmation pattern compiles");

        let suggestion = Regex::new(
            r"(?i)\b(?:suggest\w*|recommend\w*|ideas?|any (?:shows|concerts|events)|what'?s (?:on|happening))\b",
        )
        .expect("suggestion pattern compiles");

        let search_intent = Regex::new(
            r"(?i)\b(?:price\w*|cost\w*|how much|cheap(?:est)?|deals?|going rate|find|search|look(?:ing)? (?:up|for)|suggest\w*|recommend\w*)\b",
        )
        .expect("search-intent pattern compiles");

        let metro = Regex::new(&format!(r"(?i)\b(?:{})\b", METRO_KEYWORDS.join("|")))
            .expect("metro pattern compiles");

        Self {
            confirmation,
            suggestion,
            search_intent,
            metro,
        }
    }

    /// True when the message is an affirmative "proceed with the purchase".
    pub fn is_confirmation(&self, text: &str) -> bool {
        self.confirmation.is_match(text)
    }

    /// True when the message asks for suggestions or recommendations.
    pub fn wants_suggestions(&self, text: &str) -> bool {
        self.suggestion.is_match(text)
    }

    /// True when the message reads like a search/price/suggestion question.
    pub fn looks_like_search_query(&self, text: &str) -> bool {
        self.search_intent.is_match(text)
    }

    /// The recognized metro keyword mentioned in the message, if any.
    pub fn mentioned_metro(&self, text: &str) -> Option<&'static str> {
        let found = self.metro.find(text)?;
        let lowered = found.as_str().to_lowercase();
        METRO_KEYWORDS.iter().copied().find(|k| *k == lowered)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
