//! Bearer token sources for backend requests.

/// Supplies the bearer token attached to every backend request.
///
/// The token is looked up per call, so a provider may refresh or rotate it
/// between requests. Returning `None` sends the request without an
/// `Authorization` header.
pub trait CredentialProvider: Send + Sync {
    /// Returns the current bearer token, if any.
    fn bearer_token(&self) -> Option<String>;
}

/// A fixed token, typically read from the environment at startup.
///
/// ```
/// use payroll_engine::client::{CredentialProvider, StaticToken};
///
/// let token = StaticToken::new("abc123");
/// assert_eq!(token.bearer_token().as_deref(), Some("abc123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wraps a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_none() {
        assert_eq!(StaticToken::new("").bearer_token(), None);
    }
}
