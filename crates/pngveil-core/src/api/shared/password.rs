use std::fmt::{self, Debug, Formatter};

/// a password that never shows up in debug output or logs
#[derive(Default, Clone)]
pub struct Password(Option<String>);

impl Password {
    /// the password, if one was given and it is not blank
    pub fn non_empty(&self) -> Option<&str> {
        self.0.as_deref().filter(|p| !p.trim().is_empty())
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_some() {
            write!(f, "Password(***)")
        } else {
            write!(f, "Password(None)")
        }
    }
}

impl From<Option<String>> for Password {
    fn from(password: Option<String>) -> Self {
        Self(password)
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(Some(password))
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(Some(password.to_string()))
    }
}

impl AsRef<Option<String>> for Password {
    fn as_ref(&self) -> &Option<String> {
        &self.0
    }
}
