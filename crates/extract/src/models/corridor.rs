//! Corridor identity and per-corridor fetch parameters.
//!
//! A corridor is one tracked (provider, sending currency, receiving
//! currency) combination. Its [`RateKey`] is the identity used everywhere
//! downstream (snapshots, the persisted file, the read API); its
//! [`FetchParams`] describe how the provider's page for that corridor is
//! located. Keys are minted exclusively by the catalog, so holding a
//! `RateKey` is proof the corridor is tracked.

use std::fmt;

use crate::models::provider::Provider;

// =============================================================================
// Currency
// =============================================================================

/// An ISO-4217 style currency code: exactly three ASCII letters, stored
/// uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(String);

impl Currency {
    /// Validates and normalizes a currency code. Lowercase input is
    /// accepted and uppercased; anything that is not three ASCII letters is
    /// rejected.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Currency(code.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// RateKey
// =============================================================================

/// Identity of one tracked corridor.
///
/// Canonical string form is `<PROVIDER>_<FROM>_<TO>`, e.g. `MG_USD_MAD`;
/// this is the key format of the persisted snapshot file. Equality and
/// hashing are by the (provider, from, to) triple.
///
/// `RateKey` values are only constructed during catalog validation, which
/// keeps the key space closed: code holding a key can assume the corridor
/// exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RateKey {
    provider: Provider,
    from: Currency,
    to: Currency,
}

impl RateKey {
    pub(crate) fn new(provider: Provider, from: Currency, to: Currency) -> Self {
        Self { provider, from, to }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn from_currency(&self) -> &Currency {
        &self.from
    }

    pub fn to_currency(&self) -> &Currency {
        &self.to
    }

    /// Canonical `<PROVIDER>_<FROM>_<TO>` form.
    pub fn canonical(&self) -> String {
        format!("{}_{}_{}", self.provider.code(), self.from, self.to)
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.provider.code(), self.from, self.to)
    }
}

// =============================================================================
// Decimal style
// =============================================================================

/// Decimal-separator policy for one corridor's scraped text.
///
/// The separator is declared per entry in the catalog rather than inferred
/// per fetch; provider pages are locale-fixed, so guessing buys nothing and
/// mis-guessing corrupts values silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalStyle {
    /// `10.05`: separator is `.`, `,` is a grouping character.
    Dot,
    /// `10,05`: separator is `,`, `.` is a grouping character.
    Comma,
}

impl DecimalStyle {
    /// Parses the catalog's one-character style tag.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "." => Some(DecimalStyle::Dot),
            "," => Some(DecimalStyle::Comma),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            DecimalStyle::Dot => '.',
            DecimalStyle::Comma => ',',
        }
    }
}

// =============================================================================
// Fetch parameters
// =============================================================================

/// Rate element location on MoneyGram corridor pages. MoneyGram serves one
/// page template for every corridor, so the locator is fixed here instead
/// of being configured per entry.
pub const MONEYGRAM_RATE_SELECTOR: &str =
    "xpath=//*[@id=\"main\"]/div[1]/div/div/div/div[2]/div/form/div[1]/div[2]/div[1]/div[2]/span[2]";

/// Where MoneyGram shows a corridor's rate: a corridor landing page. The
/// rate element location is fixed across MoneyGram pages, so no selector is
/// configured per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneygramParams {
    pub url: String,
}

/// Where Western Union shows a corridor's rate: a page plus the selector of
/// the element holding the rate text, which varies per page family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WesternUnionParams {
    pub url: String,
    pub selector: String,
}

/// Provider-specific fetch parameters, one variant per provider.
///
/// Dispatch over this enum is exhaustive: a new provider variant fails
/// compilation at every match site until its parameters and extractor
/// exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchParams {
    Moneygram(MoneygramParams),
    WesternUnion(WesternUnionParams),
}

impl FetchParams {
    /// The provider this parameter record belongs to.
    pub fn provider(&self) -> Provider {
        match self {
            FetchParams::Moneygram(_) => Provider::Moneygram,
            FetchParams::WesternUnion(_) => Provider::WesternUnion,
        }
    }

    /// The page URL, independent of variant.
    pub fn url(&self) -> &str {
        match self {
            FetchParams::Moneygram(p) => &p.url,
            FetchParams::WesternUnion(p) => &p.url,
        }
    }

    /// The selector locating the rate text element, for sources that can
    /// evaluate selectors.
    pub fn selector(&self) -> &str {
        match self {
            FetchParams::Moneygram(_) => MONEYGRAM_RATE_SELECTOR,
            FetchParams::WesternUnion(p) => &p.selector,
        }
    }
}

// =============================================================================
// Corridor entry
// =============================================================================

/// One validated catalog entry: a corridor's identity, how to fetch it, and
/// how to read its decimals. Immutable after catalog load.
#[derive(Debug, Clone)]
pub struct CorridorEntry {
    key: RateKey,
    params: FetchParams,
    decimal_style: DecimalStyle,
}

impl CorridorEntry {
    pub(crate) fn new(key: RateKey, params: FetchParams, decimal_style: DecimalStyle) -> Self {
        Self {
            key,
            params,
            decimal_style,
        }
    }

    pub fn key(&self) -> &RateKey {
        &self.key
    }

    pub fn params(&self) -> &FetchParams {
        &self.params
    }

    pub fn decimal_style(&self) -> DecimalStyle {
        self.decimal_style
    }
}
