use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;

/// The signed-in user's practice session for one exam.
///
/// Passed explicitly to the API client and the navigation controller.
pub struct Session {
    exam_id: String,
    token: Option<SecretString>,
}

impl Session {
    pub fn new(exam_id: impl Into<String>, token: Option<String>) -> Self {
        Self {
            exam_id: exam_id.into(),
            token: token.filter(|t| !t.is_empty()).map(SecretString::from),
        }
    }

    /// Builds a session for `exam_id` using the configured token.
    pub fn from_config(config: &Config, exam_id: impl Into<String>) -> Self {
        Self::new(exam_id, config.token())
    }

    pub fn exam_id(&self) -> &str {
        &self.exam_id
    }

    /// Bearer token, if the user has signed in.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Same user, different exam.
    pub fn for_exam(&self, exam_id: impl Into<String>) -> Self {
        Self::new(exam_id, self.bearer().map(str::to_owned))
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        self.for_exam(self.exam_id.clone())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("exam_id", &self.exam_id)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
