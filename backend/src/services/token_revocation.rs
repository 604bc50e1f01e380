use std::collections::HashMap;
use std::sync::Mutex;

/// Matches the default expiry leeway applied when verifying tokens.
const EXPIRY_LEEWAY_SECONDS: i64 = 60;

/// In-memory list of revoked admin token ids.
///
/// Entries are kept until the token would have expired anyway and are pruned
/// lazily on every revocation.
#[derive(Debug, Default)]
pub struct TokenRevocationList {
    revoked: Mutex<HashMap<String, i64>>,
}

impl TokenRevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes `jti` until `expires_at` (unix seconds).
    pub fn revoke(&self, jti: &str, expires_at: i64, now: i64) {
        let span = tracing::debug_span!("revoke_token", jti);
        let _enter = span.enter();

        let mut revoked = self.revoked.lock().unwrap_or_else(|e| e.into_inner());
        revoked.retain(|_, exp| *exp + EXPIRY_LEEWAY_SECONDS > now);
        if expires_at + EXPIRY_LEEWAY_SECONDS > now {
            revoked.insert(jti.to_string(), expires_at);
        }
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(jti)
    }

    pub fn len(&self) -> usize {
        self.revoked.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
