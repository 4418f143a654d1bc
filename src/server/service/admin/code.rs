//! One-time admin registration codes.
//!
//! `AdminCodeService` keeps at most one code in memory. A code expires after its TTL and is
//! consumed by the first successful registration that presents it, so each generated code
//! can promote exactly one account.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::server::util::token::random_alphanumeric;

/// Default lifetime of a generated code.
const ADMIN_CODE_TTL: Duration = Duration::from_secs(60);

const CODE_LENGTH: usize = 32;

#[derive(Clone)]
struct AdminCode {
    code: String,
    expires_at: Instant,
}

impl AdminCode {
    fn new(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn matches(&self, input: &str) -> bool {
        self.code == input
    }
}

/// Shared holder for the current admin registration code.
///
/// Clones share the same slot, so the copy inside `AppState` sees codes generated at
/// startup.
#[derive(Clone)]
pub struct AdminCodeService {
    code: Arc<RwLock<Option<AdminCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes live for `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Generates a random 32-character alphanumeric code, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - The code to hand to the operator
    pub async fn generate(&self) -> String {
        let code = random_alphanumeric(CODE_LENGTH);
        *self.code.write().await = Some(AdminCode::new(code.clone(), self.ttl));
        code
    }

    /// Checks `input` against the stored code and consumes it on a match.
    ///
    /// Expired codes are dropped and never match. A wrong guess leaves a valid code in
    /// place.
    ///
    /// # Returns
    /// - `true` - Code matched and has been invalidated
    /// - `false` - No code, expired code or mismatch
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut code = self.code.write().await;

        let Some(stored) = code.as_ref() else {
            return false;
        };

        if stored.is_expired() {
            *code = None;
            return false;
        }

        if stored.matches(input) {
            *code = None;
            return true;
        }

        false
    }

    /// Checks `input` against the stored code without consuming it.
    pub async fn is_valid(&self, input: &str) -> bool {
        self.code
            .read()
            .await
            .as_ref()
            .is_some_and(|stored| !stored.is_expired() && stored.matches(input))
    }

    /// Whether an unexpired code is waiting to be used.
    pub async fn has_valid_code(&self) -> bool {
        let mut code = self.code.write().await;

        match code.as_ref() {
            Some(stored) if stored.is_expired() => {
                *code = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    /// Tests generating a new admin code.
    ///
    /// Expected: 32 alphanumeric characters and a valid stored code
    #[tokio::test]
    async fn generates_code() {
        let service = AdminCodeService::new();
        assert!(!service.has_valid_code().await);

        let code = service.generate().await;

        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(service.has_valid_code().await);
    }

    /// Tests that a matching code is accepted once.
    ///
    /// Expected: first validation succeeds, second fails
    #[tokio::test]
    async fn code_is_single_use() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(service.validate_and_consume(&code).await);
        assert!(!service.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
    }

    /// Tests a wrong guess.
    ///
    /// Expected: rejected while the real code stays valid
    #[tokio::test]
    async fn wrong_code_keeps_stored_code() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(!service.validate_and_consume("wrong_code").await);
        assert!(service.validate_and_consume(&code).await);
    }

    /// Tests checking a code without consuming it.
    ///
    /// Expected: repeated checks succeed and the code can still be consumed
    #[tokio::test]
    async fn is_valid_does_not_consume() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(service.is_valid(&code).await);
        assert!(service.is_valid(&code).await);
        assert!(!service.is_valid("wrong_code").await);
        assert!(service.validate_and_consume(&code).await);
        assert!(!service.is_valid(&code).await);
    }

    /// Tests validation before any code was generated.
    ///
    /// Expected: rejected
    #[tokio::test]
    async fn rejects_without_code() {
        let service = AdminCodeService::new();
        assert!(!service.validate_and_consume("any_code").await);
    }

    /// Tests that regenerating replaces the previous code.
    ///
    /// Expected: old code rejected, new code accepted
    #[tokio::test]
    async fn regenerate_replaces_code() {
        let service = AdminCodeService::new();
        let old = service.generate().await;
        let new = service.generate().await;

        assert_ne!(old, new);
        assert!(!service.validate_and_consume(&old).await);
        assert!(service.validate_and_consume(&new).await);
    }

    /// Tests expiry with a short TTL.
    ///
    /// Expected: code rejected and cleared after the TTL
    #[tokio::test]
    async fn code_expires_after_ttl() {
        let service = AdminCodeService::with_ttl(Duration::from_millis(50));
        let code = service.generate().await;
        assert!(service.has_valid_code().await);

        sleep(Duration::from_millis(80)).await;

        assert!(!service.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
    }

    /// Tests that clones share the stored code.
    ///
    /// Expected: a code generated through one handle is consumed through another
    #[tokio::test]
    async fn clones_share_state() {
        let service = AdminCodeService::new();
        let handle = service.clone();

        let code = service.generate().await;

        assert!(handle.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
    }
}
