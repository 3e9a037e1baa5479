//! Session Models

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// Number of random bytes behind a session id.
pub const SESSION_ID_BYTES: usize = 32;

/// Opaque, URL-safe session identifier carried in the session cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session id.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_ID_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(BASE64.encode(bytes))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(**redacted**)")
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionIdError {
    #[error("session id is not a valid token")]
    InvalidFormat,
}

impl FromStr for SessionId {
    type Err = SessionIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let decoded = BASE64
            .decode(value)
            .map_err(|_| SessionIdError::InvalidFormat)?;

        if decoded.len() != SESSION_ID_BYTES {
            return Err(SessionIdError::InvalidFormat);
        }

        Ok(Self(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn generated_ids_parse_back() -> TestResult {
        let id = SessionId::generate();

        let parsed: SessionId = id.as_str().parse()?;

        assert_eq!(parsed, id);
        assert_eq!(id.as_str().len(), 43);

        Ok(())
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!("".parse::<SessionId>().is_err());
        assert!("not a token".parse::<SessionId>().is_err());
        assert!("c2hvcnQ".parse::<SessionId>().is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let id = SessionId::generate();

        assert!(!format!("{id:?}").contains(id.as_str()));
    }
}
