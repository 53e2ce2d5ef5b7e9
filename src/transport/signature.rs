use base64::Engine as _;
use md5::{Digest, Md5};
use time::{OffsetDateTime, UtcOffset};

use crate::domain::{AccountSid, AccountToken};

/// Send time rendered as `YYYYMMDDHHMMSS` in the provider's clock zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactTimestamp(String);

impl CompactTimestamp {
    pub fn at(instant: OffsetDateTime, offset: UtcOffset) -> Self {
        let local = instant.to_offset(offset);
        Self(format!(
            "{:04}{:02}{:02}{:02}{:02}{:02}",
            local.year(),
            u8::from(local.month()),
            local.day(),
            local.hour(),
            local.minute(),
            local.second()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-send credential: `Authorization` header value and `sig` query parameter.
///
/// Both halves come from one [`CompactTimestamp`]; build a fresh one for every send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedCredential {
    authorization: String,
    sig: String,
}

impl SignedCredential {
    /// Base64 of `accountSid:timestamp`.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Uppercase hex MD5 of `accountSid + accountToken + timestamp`.
    pub fn sig(&self) -> &str {
        &self.sig
    }
}

/// MD5 is what the provider verifies against; it cannot be swapped for a stronger hash.
pub fn sign(
    account_sid: &AccountSid,
    account_token: &AccountToken,
    timestamp: &CompactTimestamp,
) -> SignedCredential {
    let authorization = base64::engine::general_purpose::STANDARD
        .encode(format!("{}:{}", account_sid.as_str(), timestamp.as_str()));

    let mut hasher = Md5::new();
    hasher.update(account_sid.as_str().as_bytes());
    hasher.update(account_token.as_str().as_bytes());
    hasher.update(timestamp.as_str().as_bytes());
    let sig = hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect();

    SignedCredential { authorization, sig }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SID: &str = "8a48b5514e5298b9014e67a8e3f30001";

    fn credentials() -> (AccountSid, AccountToken) {
        (
            AccountSid::new(SID).unwrap(),
            AccountToken::new("secret-token").unwrap(),
        )
    }

    fn beijing() -> UtcOffset {
        UtcOffset::from_hms(8, 0, 0).unwrap()
    }

    #[test]
    fn compact_timestamp_uses_configured_offset() {
        let instant = OffsetDateTime::from_unix_timestamp(1_704_081_600).unwrap();
        assert_eq!(
            CompactTimestamp::at(instant, beijing()).as_str(),
            "20240101120000"
        );
        assert_eq!(
            CompactTimestamp::at(instant, UtcOffset::UTC).as_str(),
            "20240101040000"
        );
    }

    #[test]
    fn sign_matches_known_vector() {
        let (sid, token) = credentials();
        let ts = CompactTimestamp("20240101120000".to_owned());
        let signed = sign(&sid, &token, &ts);

        assert_eq!(signed.sig(), "D0A04E01414D61A267977D71831B0900");
        assert_eq!(
            signed.authorization(),
            "OGE0OGI1NTE0ZTUyOThiOTAxNGU2N2E4ZTNmMzAwMDE6MjAyNDAxMDExMjAwMDA="
        );
    }

    #[test]
    fn sig_is_deterministic_uppercase_hex() {
        let (sid, token) = credentials();
        let ts = CompactTimestamp("20240101120000".to_owned());
        let first = sign(&sid, &token, &ts);
        let second = sign(&sid, &token, &ts);

        assert_eq!(first, second);
        assert_eq!(first.sig().len(), 32);
        assert!(
            first
                .sig()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn sig_changes_with_timestamp() {
        let (sid, token) = credentials();
        let later = sign(&sid, &token, &CompactTimestamp("20240101120001".to_owned()));
        assert_eq!(later.sig(), "948813837E61D1332A25A0A7DC3F15FF");
    }
}
