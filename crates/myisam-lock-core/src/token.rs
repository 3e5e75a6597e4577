//! The release token sent over the rendezvous channel.

/// Sentinel meaning "the backup is done, unlock now".
pub const RELEASE_TOKEN: &str = "UNLOCK_MYISAM_TABLES";

/// Maximum number of bytes read from a single rendezvous connection.
pub const MAX_PAYLOAD_LEN: usize = 1024;

/// Bytes written by the signaler.
pub fn release_payload() -> Vec<u8> {
    format!("{RELEASE_TOKEN}\n").into_bytes()
}

/// Returns true when `payload` is exactly the release token once surrounding
/// whitespace is trimmed.
pub fn is_release_token(payload: &str) -> bool {
    payload.trim() == RELEASE_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matching() {
        assert!(is_release_token("UNLOCK_MYISAM_TABLES"));
        assert!(is_release_token("UNLOCK_MYISAM_TABLES\n"));
        assert!(is_release_token("  UNLOCK_MYISAM_TABLES\r\n"));
        assert!(!is_release_token("unlock_myisam_tables"));
        assert!(!is_release_token("UNLOCK_MYISAM_TABLES please"));
        assert!(!is_release_token(""));
    }

    #[test]
    fn test_payload_round_trips() {
        let payload = String::from_utf8(release_payload()).unwrap();
        assert!(payload.ends_with('\n'));
        assert!(is_release_token(&payload));
    }
}
