//! # Combinatorics
//!
//! Exact integer binomial coefficients for combination-style bets.
//!
//! ## Why Not Factorials?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  n! / (m! (n-m)!)   overflows u64 from 21! on, long before C(n,m) does  │
//! │                                                                         │
//! │  Multiplicative form, k = min(m, n-m):                                 │
//! │    acc_0 = 1                                                            │
//! │    acc_i = acc_{i-1} × (n - k + i) / i      (exact at every step,       │
//! │                                              acc_i = C(n-k+i, i))       │
//! │                                                                         │
//! │  C(60, 30) = 118264581564861424 fits comfortably in u64.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

/// Number of ways to choose `m` of `n` elements, unordered, no repetition.
///
/// Returns 0 when `m > n` or either argument is negative. Saturates at
/// `u64::MAX`, which no slip size comes near.
///
/// ## Example
/// ```rust
/// use slip_core::combinatorics::combination;
///
/// assert_eq!(combination(5, 2), 10);
/// assert_eq!(combination(6, 3), 20);
/// assert_eq!(combination(4, 5), 0);
/// assert_eq!(combination(7, 0), 1);
/// ```
pub fn combination(n: i64, m: i64) -> u64 {
    if n < 0 || m < 0 || m > n {
        return 0;
    }

    let k = m.min(n - m) as u128;
    let n = n as u128;
    let mut acc: u128 = 1;

    for i in 1..=k {
        acc = match acc.checked_mul(n - k + i) {
            Some(product) => product / i,
            None => return u64::MAX,
        };
        if acc > u64::MAX as u128 {
            return u64::MAX;
        }
    }

    acc as u64
}
