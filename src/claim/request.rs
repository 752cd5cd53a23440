//! Claim inputs: who is asking and where the funds go.

use std::fmt;

use alloy::primitives::Address;

/// Chat-platform identity of the person claiming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequesterId(pub u64);

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequesterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Parse user-typed text as a destination address.
///
/// Accepts `0x` followed by 40 hex digits. Mixed-case input must carry a valid
/// EIP-55 checksum; all-lowercase and all-uppercase digits are taken as-is.
pub fn parse_address(text: &str) -> Option<Address> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))?;

    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", digits), None).ok()
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_accepts_checksummed_and_single_case() {
        let expected: Address = CHECKSUMMED.parse().unwrap();
        assert_eq!(parse_address(CHECKSUMMED), Some(expected));
        assert_eq!(parse_address(&CHECKSUMMED.to_lowercase()), Some(expected));
        assert_eq!(
            parse_address(&format!("0x{}", CHECKSUMMED[2..].to_uppercase())),
            Some(expected)
        );
        assert_eq!(parse_address(&format!("  {}\n", CHECKSUMMED)), Some(expected));
    }

    #[test]
    fn test_rejects_bad_checksum() {
        // Flip the case of one letter.
        let broken = CHECKSUMMED.replacen("f39F", "f39f", 1);
        assert_eq!(parse_address(&broken), None);
    }

    #[test]
    fn test_rejects_malformed_text() {
        for input in [
            "",
            "hello",
            "0x",
            "f39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb922666",
            "0xg39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        ] {
            assert_eq!(parse_address(input), None, "accepted {:?}", input);
        }
    }
}
