use rand::RngCore;
use rand::rngs::OsRng;

/// Random values a reconciliation may need, drawn before planning so that
/// planning itself stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    /// Candidate for `$wgSecretKey` if no key exists yet.
    pub secret_key: String,
    /// Password for the bootstrap account created by the schema setup.
    pub bootstrap_password: String,
}

impl Tokens {
    pub fn generate() -> Self {
        Self { secret_key: random_hex(32), bootstrap_password: random_hex(24) }
    }
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
