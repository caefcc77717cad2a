use sha2::{Digest, Sha256};
use tracing::warn;

/// Administrator account requested through the `admins` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
}

/// Parse space-separated `user:password` tokens.
///
/// Malformed tokens are skipped individually. An empty value yields no
/// accounts; it never means "remove existing administrators".
pub fn parse_admins(value: &str) -> Vec<AdminAccount> {
    value
        .split_whitespace()
        .filter_map(|token| match token.split_once(':') {
            Some((username, password)) if !username.is_empty() && !password.is_empty() => {
                let account = AdminAccount {
                    username: username.to_string(),
                    password: password.to_string(),
                };
                Some(account)
            }
            _ => {
                warn!(token = %redact(token), "Skipping malformed admin entry");
                None
            }
        })
        .collect()
}

/// Fingerprint of an `admins` value, used to skip reprovisioning.
pub fn admins_digest(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.trim().as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

fn redact(token: &str) -> String {
    match token.split_once(':') {
        Some((user, _)) => format!("{}:***", user),
        None => token.to_string(),
    }
}
