//! Request authentication for the control panel.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Decides whether a presented credential grants access.
pub trait Authenticator: Send + Sync {
    fn authorize(&self, presented: Option<&str>) -> bool;
}

/// A single static token shared between the operator and the bot.
///
/// Only the SHA-256 digest of the token is kept in memory.
pub struct SharedSecret {
    digest: String,
}

impl SharedSecret {
    pub fn new(token: &SecretString) -> Self {
        Self {
            digest: hash_token(token.expose_secret()),
        }
    }
}

impl Authenticator for SharedSecret {
    fn authorize(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(token) => hash_token(token) == self.digest,
            None => false,
        }
    }
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
