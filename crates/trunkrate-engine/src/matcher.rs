//! Pattern matching for dynamic override rules
//!
//! Determines whether a rule's pattern matches a call and reports a
//! specificity score used for priority tie-breaking.
//!
//! # Number normalization
//!
//! Dialed numbers are normalized by stripping every non-digit character
//! (`+`, dashes, spaces). `Prefix` rules match against this full digit
//! string, country code retained, so a `1800` rule matches `+1-800-555-1234`.
//! The national-significant number (NSN) additionally drops a leading NANP
//! country code `1` from an 11-digit number; `NPANxx` rules match against
//! the NSN.

use trunkrate_core::models::{CallAttributes, DynamicOverrideRule, RuleType};
use trunkrate_core::{AppError, AppResult};

use crate::constants::{CIC_SPECIFICITY, NPANXX_LEN, OCN_LATA_SEGMENT_WEIGHT};

/// Strip every non-digit character from a dialed number
pub fn normalize_digits(number: &str) -> String {
    number.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Derive the national-significant number from normalized digits
///
/// Drops a leading `1` from an 11-digit NANP number; anything else is
/// returned unchanged.
pub fn national_number(digits: &str) -> &str {
    if digits.len() == 11 && digits.starts_with('1') {
        &digits[1..]
    } else {
        digits
    }
}

/// Match a rule's pattern against a call
///
/// Returns `Some(specificity)` on a match, `None` on a non-match, and
/// `InvalidPattern` when the pattern is empty or malformed for its type.
/// Callers are expected to skip invalid rules rather than abort rating.
pub fn match_rule(rule: &DynamicOverrideRule, call: &CallAttributes) -> AppResult<Option<u32>> {
    let pattern = rule.pattern.trim();
    if pattern.is_empty() {
        return Err(invalid(rule, "empty pattern"));
    }

    match rule.rule_type {
        RuleType::NpaNxx => {
            if pattern.len() != NPANXX_LEN || !pattern.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(rule, "NPANxx pattern must be exactly 6 digits"));
            }
            let digits = normalize_digits(&call.dialed_number);
            Ok(national_number(&digits)
                .starts_with(pattern)
                .then_some(NPANXX_LEN as u32))
        }
        RuleType::Prefix => {
            if !pattern.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(rule, "prefix pattern must be digits"));
            }
            let digits = normalize_digits(&call.dialed_number);
            Ok(digits
                .starts_with(pattern)
                .then_some(pattern.len() as u32))
        }
        RuleType::OcnLata => {
            let (ocn, lata) = match pattern.split_once('/') {
                Some((o, l)) => (o.trim(), l.trim()),
                None => (pattern, ""),
            };
            if ocn.is_empty() && lata.is_empty() {
                return Err(invalid(rule, "OCN/LATA pattern has no segments"));
            }

            let ocn_matches = ocn.is_empty() || call.calling_ocn.as_deref() == Some(ocn);
            let lata_matches = lata.is_empty() || call.calling_lata.as_deref() == Some(lata);

            if ocn_matches && lata_matches {
                let segments = u32::from(!ocn.is_empty()) + u32::from(!lata.is_empty());
                Ok(Some(segments * OCN_LATA_SEGMENT_WEIGHT))
            } else {
                Ok(None)
            }
        }
        RuleType::Cic => Ok((call.cic.as_deref() == Some(pattern)).then_some(CIC_SPECIFICITY)),
    }
}

fn invalid(rule: &DynamicOverrideRule, reason: &str) -> AppError {
    AppError::InvalidPattern {
        rule_id: rule.id.clone(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trunkrate_core::models::MaxOverride;

    fn rule(rule_type: RuleType, pattern: &str) -> DynamicOverrideRule {
        DynamicOverrideRule {
            id: "rule-1".to_string(),
            rule_type,
            pattern: pattern.to_string(),
            override_rate: dec!(0.01),
            max_override: MaxOverride::Unbounded,
            priority: 1,
            enabled: true,
            description: None,
        }
    }

    fn call(dialed: &str) -> CallAttributes {
        CallAttributes {
            dialed_number: dialed.to_string(),
            calling_ocn: None,
            calling_lata: None,
            cic: None,
            raw_seconds: 60,
            zone: "DOM".to_string(),
        }
    }

    #[test]
    fn test_normalize_digits() {
        assert_eq!(normalize_digits("+1-212-555-1234"), "12125551234");
        assert_eq!(normalize_digits("2125551234"), "2125551234");
    }

    #[test]
    fn test_national_number_strips_nanp_country_code() {
        assert_eq!(national_number("12125551234"), "2125551234");
        assert_eq!(national_number("2125551234"), "2125551234");
        // Non-NANP lengths are left alone
        assert_eq!(national_number("442071234567"), "442071234567");
    }

    #[test]
    fn test_npanxx_matches_nsn() {
        let r = rule(RuleType::NpaNxx, "212555");
        assert_eq!(match_rule(&r, &call("+12125551234")).unwrap(), Some(6));
        assert_eq!(match_rule(&r, &call("2125551234")).unwrap(), Some(6));
        assert_eq!(match_rule(&r, &call("3105551234")).unwrap(), None);
    }

    #[test]
    fn test_npanxx_rejects_malformed() {
        let r = rule(RuleType::NpaNxx, "21255");
        assert!(matches!(
            match_rule(&r, &call("2125551234")),
            Err(AppError::InvalidPattern { .. })
        ));
        let r = rule(RuleType::NpaNxx, "21255x");
        assert!(match_rule(&r, &call("2125551234")).is_err());
    }

    #[test]
    fn test_prefix_keeps_country_code() {
        let r = rule(RuleType::Prefix, "1800");
        assert_eq!(match_rule(&r, &call("18005551234")).unwrap(), Some(4));
        assert_eq!(match_rule(&r, &call("+1 (800) 555-1234")).unwrap(), Some(4));
        assert_eq!(match_rule(&r, &call("18885551234")).unwrap(), None);
    }

    #[test]
    fn test_prefix_rejects_non_digits() {
        let r = rule(RuleType::Prefix, "18-00");
        assert!(match_rule(&r, &call("18005551234")).is_err());
    }

    #[test]
    fn test_ocn_lata_segments() {
        let mut c = call("2125551234");
        c.calling_ocn = Some("7421".to_string());
        c.calling_lata = Some("132".to_string());

        // OCN only
        let r = rule(RuleType::OcnLata, "7421");
        assert_eq!(match_rule(&r, &c).unwrap(), Some(10));

        // LATA only
        let r = rule(RuleType::OcnLata, "/132");
        assert_eq!(match_rule(&r, &c).unwrap(), Some(10));

        // Both segments: more specific
        let r = rule(RuleType::OcnLata, "7421/132");
        assert_eq!(match_rule(&r, &c).unwrap(), Some(20));

        // Mismatched LATA fails the whole rule
        let r = rule(RuleType::OcnLata, "7421/999");
        assert_eq!(match_rule(&r, &c).unwrap(), None);
    }

    #[test]
    fn test_ocn_lata_requires_call_attribute() {
        let c = call("2125551234");
        let r = rule(RuleType::OcnLata, "7421");
        assert_eq!(match_rule(&r, &c).unwrap(), None);
    }

    #[test]
    fn test_ocn_lata_empty_segments_invalid() {
        let r = rule(RuleType::OcnLata, "/");
        assert!(match_rule(&r, &call("2125551234")).is_err());
    }

    #[test]
    fn test_cic_exact_match() {
        let mut c = call("2125551234");
        c.cic = Some("0288".to_string());

        let r = rule(RuleType::Cic, "0288");
        assert_eq!(match_rule(&r, &c).unwrap(), Some(CIC_SPECIFICITY));

        let r = rule(RuleType::Cic, "0333");
        assert_eq!(match_rule(&r, &c).unwrap(), None);
    }

    #[test]
    fn test_empty_pattern_invalid() {
        let r = rule(RuleType::Prefix, "  ");
        assert!(matches!(
            match_rule(&r, &call("18005551234")),
            Err(AppError::InvalidPattern { .. })
        ));
    }
}
