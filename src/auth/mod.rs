//! HTTP Basic credential handling and password hashing.

use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD},
    Engine as _,
};
use thiserror::Error;

const BASIC_SCHEME: &str = "basic ";

/// Username and password decoded from an `Authorization: Basic ...` header
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub user_name: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Header does not use the Basic scheme
    #[error("authorization header does not use the Basic scheme")]
    NotBasic,

    /// Payload is not base64 `user:password` with both parts non-empty
    #[error("malformed Basic credentials")]
    Malformed,
}

/// Parse the value of an Authorization header.
///
/// The scheme name matches case-insensitively and the payload may omit its
/// `=` padding. The payload is split on the first `:`, so passwords may
/// themselves contain colons.
pub fn parse_basic_header(header: &str) -> Result<BasicCredentials, CredentialError> {
    let header = header.trim_start();
    let scheme = header
        .get(..BASIC_SCHEME.len())
        .ok_or(CredentialError::NotBasic)?;
    if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
        return Err(CredentialError::NotBasic);
    }

    let encoded = header[BASIC_SCHEME.len()..].trim();
    let decoded = STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .map_err(|_| CredentialError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| CredentialError::Malformed)?;

    let (user_name, password) = decoded.split_once(':').ok_or(CredentialError::Malformed)?;
    if user_name.is_empty() || password.is_empty() {
        return Err(CredentialError::Malformed);
    }

    Ok(BasicCredentials {
        user_name: user_name.to_string(),
        password: password.to_string(),
    })
}

/// Build an Authorization header value for the given credentials
pub fn basic_auth_header(user_name: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user_name, password)))
}

/// Hash a password for storage in `thingful_users.password`
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Compare a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}
