//! Payload generation for insert statements

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed for `PayloadFill::Random`, fixed so runs are repeatable
pub const PAYLOAD_SEED: u64 = 0x5EED_5EED;

/// Byte pattern used to fill generated payloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFill {
    /// All zero bytes
    #[default]
    Zeros,
    /// Pseudo-random bytes from a seeded `SmallRng`
    Random,
}

/// Generate a blob of exactly `size` bytes
pub fn generate_payload(size: u64, fill: PayloadFill) -> Vec<u8> {
    let mut payload = vec![0u8; size as usize];
    if fill == PayloadFill::Random {
        let mut rng = SmallRng::seed_from_u64(PAYLOAD_SEED);
        rng.fill_bytes(&mut payload);
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_length_matches_request() {
        for size in [0u64, 1, 64, 256, 1024, 4096, 1024 * 1024] {
            assert_eq!(generate_payload(size, PayloadFill::Zeros).len() as u64, size);
            assert_eq!(generate_payload(size, PayloadFill::Random).len() as u64, size);
        }
    }

    #[test]
    fn test_zero_fill() {
        assert!(generate_payload(4096, PayloadFill::Zeros).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_random_fill_is_repeatable() {
        let a = generate_payload(4096, PayloadFill::Random);
        let b = generate_payload(4096, PayloadFill::Random);
        assert_eq!(a, b);
        assert!(a.iter().any(|&byte| byte != 0));
    }
}
