//! Dollar-price extraction from search-result text.
//!
//! Result snippets are messy: they mix ticket prices with parking fees,
//! hotel rates, and fragment mismatches. Extraction scans for dollar
//! patterns, skips amounts under a noise floor, and offers two selection
//! modes: the minimum across all results, or the first result from a
//! preferred resale domain.

use regex::Regex;

use crate::types::SearchResult;

/// Minimum dollar amount treated as a plausible ticket price.
///
/// Heuristic, not a hard rule: it filters parking fees and fragment
/// mismatches but can discard legitimate cheap tickets, so every entry point
/// takes the floor as a parameter.
pub const DEFAULT_PRICE_FLOOR: i64 = 30;

/// Resale domains favored for clean price signals.
pub const RESALE_DOMAINS: [&str; 2] = ["stubhub.com", "vividseats.com"];

/// Compiled price-extraction patterns. Build once, share by reference.
#[derive(Debug)]
pub struct PriceExtractor {
    dollar: Regex,
    irrelevant: Regex,
}

impl PriceExtractor {
    pub fn new() -> Self {
        // $NN up to $NNNN, optionally a range ($45-$60, $45–60, $45 to $60).
        // The considered amount is the range's lower bound.
        let dollar = Regex::new(r"\$\s*(\d{2,4})\b(?:\s*(?:-|–|—|to)\s*\$?\s*\d{2,4}\b)?")
            .expect("dollar pattern compiles");

        let irrelevant = Regex::new(r"(?i)\b(?:parking|hotel|restaurant|faq|blog)\b")
            .expect("irrelevance pattern compiles");

        Self { dollar, irrelevant }
    }

    /// First dollar amount at or above `floor`, scanning in match order.
    ///
    /// Sub-floor amounts are noise (parking fees, partial matches) and are
    /// skipped rather than ending the scan.
    pub fn extract_price(&self, text: &str, floor: i64) -> Option<i64> {
        self.dollar
            .captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<i64>().ok())
            .find(|amount| *amount >= floor)
    }

    /// Price found in one result's combined title and snippet.
    pub fn result_price(&self, result: &SearchResult, floor: i64) -> Option<i64> {
        let haystack = format!("{} {}", result.title, result.snippet);
        self.extract_price(&haystack, floor)
    }

    /// Lowest qualifying amount across all results.
    pub fn lowest_price(&self, results: &[SearchResult], floor: i64) -> Option<i64> {
        results
            .iter()
            .filter_map(|r| self.result_price(r, floor))
            .min()
    }

    /// Resale-first starting price for a specific artist/city ask.
    ///
    /// Restricts to results whose link is on a preferred resale domain, drops
    /// any whose title or snippet mentions parking/hotel/restaurant/FAQ/blog,
    /// and uses the first remaining result's price rather than the minimum.
    pub fn resale_starting_price(&self, results: &[SearchResult], floor: i64) -> Option<i64> {
        results
            .iter()
            .filter(|r| RESALE_DOMAINS.iter().any(|domain| r.link.contains(domain)))
            .find(|r| !self.is_irrelevant(r))
            .and_then(|r| self.result_price(r, floor))
    }

    fn is_irrelevant(&self, result: &SearchResult) -> bool {
        self.irrelevant.is_match(&result.title) || self.irrelevant.is_match(&result.snippet)
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// The two-sentence price-summary message: a summary line, then the fixed
/// prompt asking whether to open the request form.
pub fn price_summary(price: Option<i64>) -> String {
    const FORM_PROMPT: &str = "Want me to open the request form so we can lock in the details?";
    match price {
        Some(amount) => format!(
            "The cheapest tickets I'm seeing start around ${}. {}",
            amount, FORM_PROMPT
        ),
        None => format!(
            "I couldn't confirm a current ticket price just now. {}",
            FORM_PROMPT
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(rank: u32, title: &str, link: &str, snippet: &str) -> SearchResult {
        SearchResult {
            rank,
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
        }
    }

    #[test]
    fn test_parking_fee_filtered_by_floor() {
        let extractor = PriceExtractor::new();
        let price = extractor.extract_price("Tickets from $45, parking $20", DEFAULT_PRICE_FLOOR);
        assert_eq!(price, Some(45));
    }

    #[test]
    fn test_sub_floor_amount_does_not_mask_later_price() {
        let extractor = PriceExtractor::new();
        let price = extractor.extract_price("parking $20, tickets from $45", DEFAULT_PRICE_FLOOR);
        assert_eq!(price, Some(45));
    }

    #[test]
    fn test_no_dollar_sign_yields_none() {
        let extractor = PriceExtractor::new();
        assert_eq!(
            extractor.extract_price("Sold out everywhere", DEFAULT_PRICE_FLOOR),
            None
        );
    }

    #[test]
    fn test_range_uses_lower_bound() {
        let extractor = PriceExtractor::new();
        assert_eq!(
            extractor.extract_price("Resale $45-$120 tonight", DEFAULT_PRICE_FLOOR),
            Some(45)
        );
        assert_eq!(
            extractor.extract_price("From $55 to $90", DEFAULT_PRICE_FLOOR),
            Some(55)
        );
    }

    #[test]
    fn test_floor_boundary() {
        let extractor = PriceExtractor::new();
        assert_eq!(extractor.extract_price("$29 left", DEFAULT_PRICE_FLOOR), None);
        assert_eq!(
            extractor.extract_price("$30 left", DEFAULT_PRICE_FLOOR),
            Some(30)
        );
    }

    #[test]
    fn test_floor_is_tunable() {
        let extractor = PriceExtractor::new();
        assert_eq!(extractor.extract_price("$15 lawn seats", 10), Some(15));
    }

    #[test]
    fn test_five_digit_amounts_ignored() {
        let extractor = PriceExtractor::new();
        assert_eq!(
            extractor.extract_price("serial $12345 listing", DEFAULT_PRICE_FLOOR),
            None
        );
    }

    #[test]
    fn test_lowest_price_across_results() {
        let extractor = PriceExtractor::new();
        let results = vec![
            result(1, "Tickets from $88", "https://example.com/a", ""),
            result(2, "Deals", "https://example.com/b", "starting at $52"),
            result(3, "No pricing here", "https://example.com/c", ""),
        ];
        assert_eq!(
            extractor.lowest_price(&results, DEFAULT_PRICE_FLOOR),
            Some(52)
        );
    }

    #[test]
    fn test_resale_first_restricts_to_preferred_domains() {
        let extractor = PriceExtractor::new();
        let results = vec![
            result(1, "Tickets from $40", "https://example.com/cheap", ""),
            result(2, "Tickets from $75", "https://www.stubhub.com/event", ""),
        ];
        assert_eq!(
            extractor.resale_starting_price(&results, DEFAULT_PRICE_FLOOR),
            Some(75)
        );
    }

    #[test]
    fn test_resale_first_skips_parking_and_uses_first_not_minimum() {
        let extractor = PriceExtractor::new();
        let results = vec![
            result(
                1,
                "Official Parking Passes from $35",
                "https://www.stubhub.com/parking",
                "",
            ),
            result(2, "Tickets from $95", "https://vividseats.com/event", ""),
            result(3, "Tickets from $60", "https://www.stubhub.com/other", ""),
        ];
        // First relevant resale result wins even though a cheaper one follows.
        assert_eq!(
            extractor.resale_starting_price(&results, DEFAULT_PRICE_FLOOR),
            Some(95)
        );
    }

    #[test]
    fn test_resale_first_none_when_no_preferred_domain() {
        let extractor = PriceExtractor::new();
        let results = vec![result(1, "Tickets from $50", "https://example.com", "")];
        assert_eq!(
            extractor.resale_starting_price(&results, DEFAULT_PRICE_FLOOR),
            None
        );
    }

    #[test]
    fn test_price_summary_two_sentences() {
        let with_price = price_summary(Some(45));
        assert!(with_price.contains("$45"));
        assert!(with_price.contains("open the request form"));

        let without = price_summary(None);
        assert!(without.contains("couldn't confirm"));
        assert!(without.contains("open the request form"));
        assert!(!without.is_empty());
    }
}
