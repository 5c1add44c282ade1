//! Regional and K prefix handling.

use crate::models::Region;

/// Regional prefixes and the region each selects. Unprefixed codes are UK.
const REGION_PREFIXES: [(char, Region); 2] = [('S', Region::Scotland), ('C', Region::Wales)];

const NEGATIVE_ALLOWANCE_PREFIX: char = 'K';

/// Splits a regional prefix off the front of a normalized code.
pub(super) fn split_region_prefix(code: &str) -> (Region, &str) {
    REGION_PREFIXES
        .iter()
        .find_map(|&(prefix, region)| code.strip_prefix(prefix).map(|rest| (region, rest)))
        .unwrap_or((Region::Uk, code))
}

/// Splits a K prefix off the front of a code body.
///
/// Returns whether the prefix was present, along with the remaining body.
pub(super) fn split_negative_prefix(body: &str) -> (bool, &str) {
    match body.strip_prefix(NEGATIVE_ALLOWANCE_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scottish_prefix() {
        assert_eq!(split_region_prefix("S1257L"), (Region::Scotland, "1257L"));
    }

    #[test]
    fn test_welsh_prefix() {
        assert_eq!(split_region_prefix("CK456"), (Region::Wales, "K456"));
    }

    #[test]
    fn test_no_prefix_is_uk() {
        assert_eq!(split_region_prefix("1257L"), (Region::Uk, "1257L"));
        assert_eq!(split_region_prefix("NT"), (Region::Uk, "NT"));
    }

    #[test]
    fn test_only_one_regional_prefix_is_removed() {
        assert_eq!(split_region_prefix("SC1257L"), (Region::Scotland, "C1257L"));
    }

    #[test]
    fn test_k_prefix() {
        assert_eq!(split_negative_prefix("K500"), (true, "500"));
        assert_eq!(split_negative_prefix("1257L"), (false, "1257L"));
    }
}
