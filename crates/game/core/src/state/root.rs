//! State root computation for replay verification.

use super::GameState;

/// Computes a deterministic digest of the full simulation state.
///
/// Two runs fed the same content, seed and triggers must produce identical
/// roots at every tick. bincode serialization is field-ordered and stable, and
/// SHA-256 condenses it to 32 bytes.
pub fn compute_state_root(state: &GameState) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    if let Ok(bytes) = bincode::serialize(state) {
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}
