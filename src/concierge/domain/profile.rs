//! Keyword extraction of a request profile from free text.

/// Keyword fragments mapped to the service types the directory knows.
///
/// Fragments are matched against the lowercased description; the first hit
/// in table order wins.
const SERVICE_KEYWORDS: [(&str, &str); 8] = [
    ("landscap", "landscaping"),
    ("lawn", "landscaping"),
    ("yard", "landscaping"),
    ("paint", "painting"),
    ("clean", "cleaning"),
    ("handyman", "handyman"),
    ("repair", "handyman"),
    ("fix", "handyman"),
];

/// City keywords the directory covers.
const CITY_KEYWORDS: [&str; 2] = ["charlotte", "raleigh"];

/// What the stub concierge understood from a request description.
///
/// This is a deterministic keyword scan standing in for the managed
/// runtime's language understanding; fields it cannot find stay `None` and
/// the caller decides what an incomplete profile means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestProfile {
    /// Matched service type, lowercased.
    pub service: Option<String>,
    /// Matched city, lowercased.
    pub city: Option<String>,
    /// Budget in whole dollars, when the text carries a `$` amount.
    pub budget_dollars: Option<u64>,
}

impl RequestProfile {
    /// Extracts a profile from a request description.
    #[must_use]
    pub fn extract(description: &str) -> Self {
        let lowered = description.to_lowercase();
        let service = SERVICE_KEYWORDS
            .iter()
            .find(|(fragment, _)| lowered.contains(fragment))
            .map(|(_, name)| (*name).to_owned());
        let city = CITY_KEYWORDS
            .iter()
            .find(|keyword| lowered.contains(*keyword))
            .map(|keyword| (*keyword).to_owned());

        Self {
            service,
            city,
            budget_dollars: extract_budget(&lowered),
        }
    }
}

/// Parses the first `$` amount in the text as whole dollars.
fn extract_budget(text: &str) -> Option<u64> {
    let after_sign = text.split('$').nth(1)?;
    let digits: String = after_sign
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
