// Password hashing for the HTTP Basic-Auth gate.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

// Scheme prefix, in the style of htpasswd's `{SHA}` entries.
const SCHEME: &str = "{SHA256}";

/// Hashes a password into `{SHA256}<base64 digest>`.
///
/// The configured password is hashed once at startup; presented passwords
/// are hashed per request and compared with [`constant_time_eq`].
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{SCHEME}{}", STANDARD.encode(hasher.finalize()))
}

/// Compares two credential strings without an early exit on the first
/// differing byte. Only the length comparison can short-circuit.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
