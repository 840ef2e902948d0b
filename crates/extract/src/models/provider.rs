//! The closed set of remittance providers this service tracks.

use std::fmt;

/// Provider code identifiers used in canonical corridor keys.
pub const PROVIDER_CODE_MONEYGRAM: &str = "MG";
pub const PROVIDER_CODE_WESTERN_UNION: &str = "WU";

/// A tracked remittance provider.
///
/// This is a closed set: adding a provider means adding a variant, a
/// parameter record and an extractor, and the compiler walks every dispatch
/// site. There is no "unknown provider" state past catalog validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    /// MoneyGram corridor pages (rate shown as `1 USD = 10.05 MAD`).
    Moneygram,
    /// Western Union send-money and converter pages.
    WesternUnion,
}

impl Provider {
    /// Every tracked provider, in canonical order.
    pub const ALL: [Provider; 2] = [Provider::Moneygram, Provider::WesternUnion];

    /// Short code used in canonical keys and the persisted snapshot file.
    pub fn code(&self) -> &'static str {
        match self {
            Provider::Moneygram => PROVIDER_CODE_MONEYGRAM,
            Provider::WesternUnion => PROVIDER_CODE_WESTERN_UNION,
        }
    }

    /// Human-readable name for log lines and API payloads.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Moneygram => "MoneyGram",
            Provider::WesternUnion => "Western Union",
        }
    }

    /// Parses a provider from its code or name, case-insensitively.
    ///
    /// Accepts the short code (`MG`, `WU`) as well as the spelled-out forms
    /// used in request paths (`moneygram`, `western_union`, `westernunion`).
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MG" | "MONEYGRAM" => Some(Provider::Moneygram),
            "WU" | "WESTERNUNION" | "WESTERN_UNION" => Some(Provider::WesternUnion),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_codes_are_stable() {
        assert_eq!(Provider::Moneygram.code(), "MG");
        assert_eq!(Provider::WesternUnion.code(), "WU");
    }

    #[test]
    fn test_from_code_accepts_codes_and_names() {
        assert_eq!(Provider::from_code("MG"), Some(Provider::Moneygram));
        assert_eq!(Provider::from_code("mg"), Some(Provider::Moneygram));
        assert_eq!(Provider::from_code("moneygram"), Some(Provider::Moneygram));
        assert_eq!(Provider::from_code("WU"), Some(Provider::WesternUnion));
        assert_eq!(Provider::from_code("western_union"), Some(Provider::WesternUnion));
        assert_eq!(Provider::from_code("westernunion"), Some(Provider::WesternUnion));
        assert_eq!(Provider::from_code("XE"), None);
        assert_eq!(Provider::from_code(""), None);
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Provider::Moneygram.to_string(), "MG");
        assert_eq!(Provider::WesternUnion.to_string(), "WU");
    }
}
