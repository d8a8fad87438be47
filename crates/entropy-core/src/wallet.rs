//! Demo wallet generation.
//!
//! Produces opaque hex strings shaped like StarkNet wallet material.
//! This is NOT real key derivation; the fields are independent random
//! values and carry no cryptographic relationship to each other.

use std::fmt::Write as _;

use rand::RngCore;
use rand::rngs::OsRng;

const ADDRESS_HEX_LEN: usize = 40;
const PRIVATE_KEY_HEX_LEN: usize = 64;
const PUBLIC_KEY_HEX_LEN: usize = 128;

/// A pseudo wallet record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub address: String,
    pub private_key_hex: String,
    pub public_key_hex: String,
}

impl Wallet {
    /// Voyager explorer link for this wallet's address.
    pub fn explorer_link(&self) -> String {
        format!("https://voyager.online/address/{}", self.address)
    }
}

/// Generates a fresh pseudo wallet from OS randomness.
///
/// Address: `0x` + 40 lowercase hex chars; private key: 64; public
/// key: 128. No uniqueness guarantee across calls.
pub fn generate_wallet() -> Wallet {
    Wallet {
        address: format!("0x{}", random_hex(ADDRESS_HEX_LEN)),
        private_key_hex: random_hex(PRIVATE_KEY_HEX_LEN),
        public_key_hex: random_hex(PUBLIC_KEY_HEX_LEN),
    }
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len.div_ceil(2)];
    OsRng.fill_bytes(&mut bytes);
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in &bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out.truncate(len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }

    /// Wallet fields have the required shapes.
    #[test]
    fn test_wallet_field_shapes() {
        let wallet = generate_wallet();

        assert!(wallet.address.starts_with("0x"));
        assert_eq!(wallet.address.len(), 2 + ADDRESS_HEX_LEN);
        assert!(is_lower_hex(&wallet.address[2..]));

        assert_eq!(wallet.private_key_hex.len(), PRIVATE_KEY_HEX_LEN);
        assert!(is_lower_hex(&wallet.private_key_hex));

        assert_eq!(wallet.public_key_hex.len(), PUBLIC_KEY_HEX_LEN);
        assert!(is_lower_hex(&wallet.public_key_hex));
    }

    /// Two generated wallets differ (trivial-collision check only).
    #[test]
    fn test_wallets_are_not_trivially_equal() {
        let a = generate_wallet();
        let b = generate_wallet();
        assert_ne!(a, b);
    }

    /// Explorer link points at Voyager.
    #[test]
    fn test_explorer_link() {
        let wallet = generate_wallet();
        assert_eq!(
            wallet.explorer_link(),
            format!("https://voyager.online/address/{}", wallet.address)
        );
    }
}
