//! Arithmetic in ℤ/pℤ for a prime `p`.
//!
//! [`FieldElement`] is a value type: every operation below returns a new
//! element and never mutates its operands. The canonical residue is kept
//! reduced into `[0, p)` on every construction, matching spec §3's
//! invariant.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// An element of `ℤ/pℤ` for some prime modulus `p`.
#[derive(Clone, Debug)]
pub struct FieldElement {
    value: BigUint,
    modulus: BigUint,
}

impl FieldElement {
    /// Reduces `n` modulo `p` into `[0, p)`. `p` must be positive.
    pub fn from_bigint(n: &BigInt, p: &BigUint) -> Self {
        debug_assert!(!p.is_zero(), "modulus must be positive");
        let p_signed = BigInt::from(p.clone());
        let value = n.mod_floor(&p_signed).to_biguint().expect("mod_floor of a positive modulus is non-negative");
        Self {
            value,
            modulus: p.clone(),
        }
    }

    /// Reduces a non-negative integer `n` modulo `p`.
    pub fn from_biguint(n: &BigUint, p: &BigUint) -> Self {
        Self {
            value: n % p,
            modulus: p.clone(),
        }
    }

    /// Builds a field element from a small integer, for tests and curve
    /// constant tables.
    pub fn from_u64(n: u64, p: &BigUint) -> Self {
        Self::from_biguint(&BigUint::from(n), p)
    }

    /// Builds the zero element of the field `ℤ/pℤ`.
    pub fn zero(p: &BigUint) -> Self {
        Self {
            value: BigUint::zero(),
            modulus: p.clone(),
        }
    }

    /// Builds the multiplicative identity of the field `ℤ/pℤ`.
    pub fn one(p: &BigUint) -> Self {
        Self {
            value: BigUint::one(),
            modulus: p.clone(),
        }
    }

    /// The canonical residue `n`, with `0 <= n < p`.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The modulus `p` this element belongs to.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    fn check_same_modulus(&self, other: &Self) {
        assert_eq!(
            self.modulus, other.modulus,
            "field elements belong to different moduli"
        );
    }

    /// `(a.n + b.n) mod p`.
    pub fn add(&self, other: &Self) -> Self {
        self.check_same_modulus(other);
        Self {
            value: (&self.value + &other.value) % &self.modulus,
            modulus: self.modulus.clone(),
        }
    }

    /// `(a.n - b.n) mod p`.
    pub fn sub(&self, other: &Self) -> Self {
        self.check_same_modulus(other);
        let a = BigInt::from(self.value.clone());
        let b = BigInt::from(other.value.clone());
        Self::from_bigint(&(a - b), &self.modulus)
    }

    /// `(a.n * b.n) mod p`.
    pub fn mul(&self, other: &Self) -> Self {
        self.check_same_modulus(other);
        Self {
            value: (&self.value * &other.value) % &self.modulus,
            modulus: self.modulus.clone(),
        }
    }

    /// `(a.n * k) mod p` for an arbitrary integer `k`.
    pub fn mul_int(&self, k: i64) -> Self {
        let k = BigInt::from(k);
        let a = BigInt::from(self.value.clone());
        Self::from_bigint(&(a * k), &self.modulus)
    }

    /// `(p - a.n) mod p`.
    pub fn neg(&self) -> Self {
        if self.value.is_zero() {
            return self.clone();
        }
        Self {
            value: &self.modulus - &self.value,
            modulus: self.modulus.clone(),
        }
    }

    /// Modular inverse via the extended Euclidean algorithm.
    ///
    /// Returns `None` when `gcd(a.n, p) != 1`, which for a prime `p` only
    /// happens when `a.n == 0`.
    pub fn inv(&self) -> Option<Self> {
        let p = BigInt::from(self.modulus.clone());
        let a = BigInt::from(self.value.clone());
        mod_inverse(&a, &p).map(|v| Self {
            value: v.to_biguint().expect("mod_inverse result is reduced non-negative"),
            modulus: self.modulus.clone(),
        })
    }

    /// Whether `a == b`. Requires equal moduli.
    pub fn eq(&self, other: &Self) -> bool {
        self.check_same_modulus(other);
        self.value == other.value
    }

    /// Whether this element is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus && self.value == other.value
    }
}

impl Eq for FieldElement {}

/// Computes the modular inverse of `a` modulo `m` using the extended
/// Euclidean algorithm, as described in spec §4.1.
///
/// `m` need not be prime; this returns `None` exactly when
/// `gcd(a, m) != 1`. `a` may be negative; it is reduced modulo `m` first.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let mut r0 = m.clone();
    let mut r1 = a.mod_floor(m);
    let mut a0 = BigInt::zero();
    let mut a1 = BigInt::one();

    while r1 > BigInt::one() {
        let q = &r0 / &r1;
        let a1_new = &a0 - &q * &a1;
        let r1_new = &r0 - &q * &r1;
        a0 = a1;
        a1 = a1_new;
        r0 = r1;
        r1 = r1_new;
    }

    if r1 == BigInt::one() {
        Some(a1.mod_floor(m))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn mod_inverse_concrete_vectors() {
        assert_eq!(mod_inverse(&BigInt::from(7), &BigInt::from(26)), Some(BigInt::from(15)));
        assert_eq!(mod_inverse(&BigInt::from(-11), &BigInt::from(13)), Some(BigInt::from(7)));
        assert_eq!(mod_inverse(&BigInt::from(0), &BigInt::from(17)), None);
    }

    #[test]
    fn add_matches_sub_of_negation() {
        let modulus = p(101);
        let a = FieldElement::from_u64(37, &modulus);
        let b = FieldElement::from_u64(58, &modulus);
        assert_eq!(a.add(&b.neg()).value(), a.sub(&b).value());
    }

    #[test]
    fn mul_by_inverse_is_one() {
        let modulus = p(101);
        let a = FieldElement::from_u64(37, &modulus);
        let inv = a.inv().expect("37 is invertible mod 101");
        assert_eq!(a.mul(&inv).value(), &BigUint::one());
    }

    #[test]
    fn zero_has_no_inverse() {
        let modulus = p(101);
        let zero = FieldElement::zero(&modulus);
        assert!(zero.inv().is_none());
    }

    #[test]
    fn negation_of_zero_is_zero() {
        let modulus = p(101);
        let zero = FieldElement::zero(&modulus);
        assert!(zero.neg().is_zero());
    }
}
