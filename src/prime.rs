//! Prime capacity sizing shared by both table variants.
//!
//! The first half of the quadratic probe sequence hits distinct buckets
//! only when the bucket count is prime, so construction and resizing
//! always round the requested capacity up through `next_prime`. The
//! chaining table uses the same policy for parity even though chaining
//! does not strictly need it.

/// Bucket count used by `new()` on both table variants.
pub(crate) const DEFAULT_CAPACITY: usize = 11;

/// Returns the smallest prime greater than or equal to `n`, except
/// that even inputs step to `n + 1` before testing. Consequently 2 is
/// never returned: `next_prime(0)`, `next_prime(1)` and `next_prime(2)`
/// all yield 3.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Trial-division primality test. 2 and 3 are prime; 1 and every other
/// even number are not; odd candidates are divided by odd factors up
/// to the square root.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n == 1 || n % 2 == 0 {
        return false;
    }

    let mut factor = 3;
    while factor * factor <= n {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}
