// src/utils/constants.rs

/// Threshold used when the caller does not supply one.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.85;

/// Legal-entity suffixes and connector words that never identify an organization.
/// Always unioned with the caller's exclusion table.
pub const BUILTIN_EXCLUSIONS: [&str; 26] = [
    "inc", "incorporated", "corp", "corporation", "co", "company", "ltd", "limited", "llc", "lp", "llp", "plc", "sa", "gmbh", "ag", "bv", "nv", "spa", "srl", "kg", "oy", "ab", "as", "the", "&", "and",
];

/// Short form -> canonical long form, applied after exclusion filtering.
pub const ABBREVIATIONS: [(&str, &str); 11] = [
    ("corp", "corporation"),
    ("inc", "incorporated"),
    ("co", "company"),
    ("ltd", "limited"),
    ("intl", "international"),
    ("natl", "national"),
    ("tech", "technology"),
    ("sys", "systems"),
    ("sol", "solutions"),
    ("svc", "services"),
    ("grp", "group"),
];

/// Separators between alternate names, in priority order. Matching is case-sensitive.
pub const PRIMARY_NAME_SEPARATORS: [&str; 6] = [";", ",", " / ", " or ", " & ", " and "];

/// Tokens of this many characters or fewer are dropped during normalization.
pub const MAX_DROPPED_TOKEN_LENGTH: usize = 1;

/// Jaro-Winkler prefix scaling factor and maximum rewarded prefix length.
pub const WINKLER_PREFIX_SCALE: f64 = 0.1;
pub const WINKLER_MAX_PREFIX: usize = 4;
