//! Pseudo-GUID identifiers for entities.
//!
//! Identifiers look like `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, each `x`
//! drawn from `[a-z]` or `[0-9]`. They are not cryptographically secure.

use rand::Rng;

/// Length of a well-formed identifier, separators included.
pub const ID_LEN: usize = 36;

const SEPARATOR: char = '-';
const BODY_LEN: usize = 32;
const SEPARATOR_AFTER: [usize; 4] = [7, 11, 15, 19];

/// Generate a new identifier.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let mut id = String::with_capacity(ID_LEN);

    for i in 0..BODY_LEN {
        let c = if rng.gen_bool(0.5) {
            rng.gen_range(b'a'..=b'z') as char
        } else {
            rng.gen_range(b'0'..=b'9') as char
        };
        id.push(c);
        if SEPARATOR_AFTER.contains(&i) {
            id.push(SEPARATOR);
        }
    }

    id
}

/// Shape check: exactly 36 characters with exactly four separators anywhere.
pub fn is_valid(s: &str) -> bool {
    s.chars().count() == ID_LEN && s.chars().filter(|c| *c == SEPARATOR).count() == 4
}
