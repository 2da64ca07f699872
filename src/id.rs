//! # Id Generation
//!
//! Two id shapes, both compact text:
//!
//! - [`item_id`]: for wall items. Base-36 epoch milliseconds plus a random
//!   base-36 suffix, e.g. `mf2k1x0q-a9q3zt`. Unique within a process
//!   lifetime with overwhelming probability.
//! - [`local_wall_id`]: for walls created without a remote-issued id.
//!   13 characters drawn uniformly from `[A-Za-z0-9]`, short enough to be
//!   typed by hand for "join by id" entry. No uniqueness check against
//!   existing walls is performed; at 62^13 the collision risk is treated as
//!   negligible rather than actively prevented.

use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ITEM_SUFFIX_LEN: usize = 6;
const WALL_ID_LEN: usize = 13;

/// Generate an id for a new wall item.
pub fn item_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::rng();
    let suffix: String = (0..ITEM_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", to_base36(millis), suffix)
}

/// Generate an id for a wall created locally (no remote id available).
pub fn local_wall_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(WALL_ID_LEN)
        .map(char::from)
        .collect()
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}
