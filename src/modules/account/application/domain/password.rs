use rand::Rng;

/// Signup and change-password share this floor.
pub const MIN_PASSWORD_LEN: usize = 6;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!#$%&*+-=?@_";

/// Generate a throwaway password for the one-step reset flow.
///
/// Each character first picks a category uniformly (letters, digits,
/// symbols), then a character uniformly within it. Letters pool upper and
/// lower case together so the category split stays one-in-three.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(length);

    for _ in 0..length {
        let pool: &[u8] = match rng.gen_range(0..3) {
            0 => {
                if rng.gen_bool(0.5) {
                    UPPER
                } else {
                    LOWER
                }
            }
            1 => DIGITS,
            _ => SYMBOLS,
        };
        out.push(pool[rng.gen_range(0..pool.len())] as char);
    }

    out
}
