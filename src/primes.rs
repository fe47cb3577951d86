//! Prime capacities for table growth and shrinkage.
//!
//! A `PrimeSource` remembers the capacity currently in use. Advancing moves
//! to the smallest prime that is at least twice the current one; retreating
//! moves to the largest prime that is at most half of it.

/// Capacity a table starts with when none is chosen.
pub const DEFAULT_INITIAL_PRIME: usize = 7;

const SMALLEST_PRIME: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSource {
    current: usize,
}

impl PrimeSource {
    pub fn new() -> Self {
        Self {
            current: DEFAULT_INITIAL_PRIME,
        }
    }

    /// Start at the smallest prime `>= initial` (never below 2).
    pub fn with_initial(initial: usize) -> Self {
        Self {
            current: prime_at_or_above(initial.max(SMALLEST_PRIME)),
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// The prime `advance` would move to, without moving.
    pub fn peek_next(&self) -> usize {
        prime_at_or_above(self.current.saturating_mul(2))
    }

    /// Move to the next larger capacity and return it.
    pub fn advance(&mut self) -> usize {
        self.current = self.peek_next();
        self.current
    }

    /// Move to the next smaller capacity and return it. Stays at 2 once
    /// there is nothing smaller.
    pub fn retreat(&mut self) -> usize {
        self.current = prime_at_or_below(self.current / 2).unwrap_or(SMALLEST_PRIME);
        self.current
    }
}

impl Default for PrimeSource {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d = 5;
    while d * d <= n {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

fn prime_at_or_above(mut n: usize) -> usize {
    while !is_prime(n) {
        n += 1;
    }
    n
}

fn prime_at_or_below(mut n: usize) -> Option<usize> {
    while n >= SMALLEST_PRIME {
        if is_prime(n) {
            return Some(n);
        }
        n -= 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primality() {
        let primes: Vec<usize> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
    }

    #[test]
    fn advance_doubles_to_next_prime() {
        let mut p = PrimeSource::new();
        assert_eq!(p.current(), 7);
        assert_eq!(p.peek_next(), 17);
        assert_eq!(p.current(), 7, "peek must not move");
        assert_eq!(p.advance(), 17);
        assert_eq!(p.advance(), 37);
        assert_eq!(p.advance(), 79);
        assert_eq!(p.current(), 79);
    }

    #[test]
    fn retreat_halves_to_previous_prime() {
        let mut p = PrimeSource::with_initial(79);
        assert_eq!(p.retreat(), 37);
        assert_eq!(p.retreat(), 17);
        assert_eq!(p.retreat(), 7);
        assert_eq!(p.retreat(), 3);
        assert_eq!(p.retreat(), 2);
        assert_eq!(p.retreat(), 2, "floor at the smallest prime");
    }

    #[test]
    fn with_initial_rounds_up_to_prime() {
        assert_eq!(PrimeSource::with_initial(0).current(), 2);
        assert_eq!(PrimeSource::with_initial(8).current(), 11);
        assert_eq!(PrimeSource::with_initial(13).current(), 13);
    }
}
