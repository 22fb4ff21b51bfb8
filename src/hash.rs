use crate::Key;

/// Default hash base. A prime roughly the size of the key alphabet keeps
/// the polynomial well spread.
pub const DEFAULT_BASE: u64 = 104_729;

/// Default hash modulus. Large, so collisions stay rare enough that the
/// O(n) fallback in tree equality almost never runs.
pub const DEFAULT_MODULUS: u64 = 1 << 63;

/// Base and modulus of the positional rolling hash, fixed for the lifetime
/// of one tree.
///
/// The hash of a key sequence `x1, .., xn` is
/// `(x1 + x2 * base + .. + xn * base^(n-1)) mod modulus`, and a subtree's
/// hash composes from its children as
/// `hash(left) + key * base^size(left) + hash(right) * base^(size(left)+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    base: u64,
    modulus: u64,
}

impl Default for HashParams {
    fn default() -> Self {
        Self::new(DEFAULT_BASE, DEFAULT_MODULUS)
    }
}

impl HashParams {
    /// # Panics
    ///
    /// Panics if `base` or `modulus` is smaller than 2; a degenerate base
    /// or modulus collapses every sequence onto a handful of hashes.
    pub fn new(base: u64, modulus: u64) -> Self {
        assert!(base >= 2, "hash base must be at least 2");
        assert!(modulus >= 2, "hash modulus must be at least 2");
        HashParams { base, modulus }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Hash of a single-key sequence. Negative keys go through the
    /// two's-complement cast before reduction.
    pub(crate) fn key_hash(&self, key: Key) -> u64 {
        (key as u64) % self.modulus
    }

    /// Hash of a subtree from its parts: the left subtree contributes its
    /// hash verbatim, the key lands at position `left_size`, and the right
    /// subtree is shifted past both.
    pub(crate) fn combine(&self, left_hash: u64, key: Key, left_size: usize, right_hash: u64) -> u64 {
        let weight = self.pow(self.base, left_size as u64);
        let mid = self.mul(self.key_hash(key), weight);
        let right = self.mul(right_hash, self.mul(weight, self.base));
        ((left_hash as u128 + mid as u128 + right as u128) % self.modulus as u128) as u64
    }

    #[inline(always)]
    fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.modulus as u128) as u64
    }

    /// Binary exponentiation mod `modulus`.
    fn pow(&self, base: u64, mut exp: u64) -> u64 {
        let mut base = base % self.modulus;
        let mut result = 1 % self.modulus;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    // Reference polynomial, folded left to right.
    fn poly(params: &HashParams, keys: &[Key]) -> u64 {
        let m = params.modulus() as u128;
        let mut acc: u128 = 0;
        let mut weight: u128 = 1;
        for &k in keys {
            acc = (acc + (k as u64 as u128 % m) * weight) % m;
            weight = weight * params.base() as u128 % m;
        }
        acc as u64
    }

    #[test]
    fn pow_small_cases() {
        let params = HashParams::new(3, 1_000_000_007);
        assert_eq!(1, params.pow(3, 0));
        assert_eq!(3, params.pow(3, 1));
        assert_eq!(243, params.pow(3, 5));
        let small = HashParams::new(3, 7);
        assert_eq!(5, small.pow(3, 5)); // 243 % 7
    }

    #[test]
    fn single_key_is_key_mod_m() {
        let params = HashParams::default();
        assert_eq!(42, params.key_hash(42));
        assert_eq!(42, params.combine(0, 42, 0, 0));
        let small = HashParams::new(31, 97);
        assert_eq!(100 % 97, small.key_hash(100));
    }

    #[test]
    fn negative_key_wraps_like_a_cast() {
        let params = HashParams::default();
        assert_eq!((-1i64 as u64) % DEFAULT_MODULUS, params.key_hash(-1));
    }

    #[test]
    fn combine_matches_direct_polynomial() {
        let params = HashParams::default();
        let h1 = params.key_hash(1);
        let h3 = params.key_hash(3);
        // subtree: left = [1], key = 2, right = [3]
        assert_eq!(poly(&params, &[1, 2, 3]), params.combine(h1, 2, 1, h3));
    }

    #[test]
    fn combine_matches_direct_polynomial_small_modulus() {
        let params = HashParams::new(13, 251);
        let left = poly(&params, &[5, 9]);
        let right = poly(&params, &[20, 31, 44]);
        assert_eq!(
            poly(&params, &[5, 9, 11, 20, 31, 44]),
            params.combine(left, 11, 2, right)
        );
    }

    #[test]
    #[should_panic]
    fn degenerate_base_is_rejected() {
        let _ = HashParams::new(1, 97);
    }
}
