//! Per-client session state.

use crate::error::SessionError;
use super::model::SessionInfo;

/// Authentication state for one node client.
///
/// Starts empty, is replaced wholesale by a successful login, and is only
/// usable while [`verify`](Session::verify) passes.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Session id, sent as the `sid` header on every protected call.
    pub sid: String,
    /// CSRF token issued alongside the session id.
    pub csrf: String,
    /// Remaining validity in seconds as reported at login.
    pub validity: i64,
    /// Whether the node accepted the credentials.
    pub valid: bool,
}

impl Session {
    /// Checks the usability invariant: the node marked the session valid,
    /// a session id is present, and the validity is positive. All three
    /// must hold simultaneously.
    pub fn verify(&self) -> Result<(), SessionError> {
        if !self.valid {
            return Err(SessionError::Invalid);
        }
        if self.sid.is_empty() {
            return Err(SessionError::Missing);
        }
        if self.validity <= 0 {
            return Err(SessionError::Expired);
        }
        Ok(())
    }
}

impl From<SessionInfo> for Session {
    fn from(info: SessionInfo) -> Self {
        Self {
            sid: info.sid,
            csrf: info.csrf,
            validity: info.validity,
            valid: info.valid,
        }
    }
}
