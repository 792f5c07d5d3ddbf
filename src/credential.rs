use std::fmt;

/// Opaque bearer token handed over by whoever authenticated the user.
///
/// The token is only ever attached to an outgoing `Authorization` header.
/// `Debug` is redacted and there is no `Display` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Credential(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Credential(token.to_string())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
