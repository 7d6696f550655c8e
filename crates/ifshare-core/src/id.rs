//! Public ids used in share links.

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::constants::PUBLIC_ID_LENGTH;

/// Six characters drawn uniformly from `[0-9a-zA-Z]`.
///
/// Uniqueness is not checked here; callers that persist the id retry on collision.
pub fn generate_public_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(PUBLIC_ID_LENGTH)
        .map(char::from)
        .collect()
}

pub fn is_public_id(candidate: &str) -> bool {
    candidate.len() == PUBLIC_ID_LENGTH && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_six_alphanumeric_chars() {
        for _ in 0..200 {
            let id = generate_public_id();
            assert!(is_public_id(&id), "unexpected id {id}");
        }
    }

    #[test]
    fn ids_vary() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| generate_public_id()).collect();
        assert!(ids.len() > 1);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!is_public_id("abc"));
        assert!(!is_public_id("abc-12"));
        assert!(is_public_id("aZ09xY"));
    }
}
