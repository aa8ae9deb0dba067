//! User identity generation.

use rand::Rng;
use reimburse_core::{UserId, USER_ID_MAX, USER_ID_MIN};

/// Source of candidate user ids. Uniqueness is enforced by the database.
pub trait UserIdGenerator: Send + Sync {
    fn next_id(&self) -> UserId;
}

/// Uniformly random six-digit ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUserIdGenerator;

impl UserIdGenerator for RandomUserIdGenerator {
    fn next_id(&self) -> UserId {
        UserId::new(rand::thread_rng().gen_range(USER_ID_MIN..=USER_ID_MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_six_digit() {
        let generator = RandomUserIdGenerator;
        for _ in 0..1_000 {
            assert!(generator.next_id().is_six_digit());
        }
    }
}
