//! Short-Weierstrass curves `y² = x³ + a·x + b (mod p)`.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::field::FieldElement;

/// A short-Weierstrass curve over a prime field.
///
/// Curves are constructed once per named curve and shared read-only
/// thereafter (spec §3): cloning a `Curve` clones three field elements,
/// which is cheap, but callers normally hold it behind an
/// [`std::sync::Arc`] via [`crate::context::EccContext`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    p: BigUint,
    a: FieldElement,
    b: FieldElement,
}

impl Curve {
    /// Constructs a curve from its coefficients and field modulus.
    ///
    /// Rejects curves whose discriminant `4a³ + 27b²` is zero modulo `p`
    /// (a singular curve).
    pub fn new(a: &BigInt, b: &BigInt, p: &BigUint) -> Result<Self> {
        let fa = FieldElement::from_bigint(a, p);
        let fb = FieldElement::from_bigint(b, p);

        let four = FieldElement::from_u64(4, p);
        let twenty_seven = FieldElement::from_u64(27, p);

        let a_cubed = fa.mul(&fa).mul(&fa);
        let b_squared = fb.mul(&fb);
        let discriminant = four.mul(&a_cubed).add(&twenty_seven.mul(&b_squared));

        if discriminant.is_zero() {
            return Err(Error::InvalidParameters);
        }

        Ok(Self { p: p.clone(), a: fa, b: fb })
    }

    /// The field modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The curve coefficient `a`.
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// The curve coefficient `b`.
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    /// Wraps an integer into a field element belonging to this curve's
    /// field.
    pub fn field_element(&self, n: &BigInt) -> FieldElement {
        FieldElement::from_bigint(n, &self.p)
    }

    /// Evaluates the right-hand side of the curve equation at `x`:
    /// `x³ + a·x + b`.
    pub fn rhs(&self, x: &FieldElement) -> FieldElement {
        x.mul(x).mul(x).add(&self.a.mul(x)).add(&self.b)
    }

    /// Whether `(x, y)` satisfies `y² = x³ + a·x + b (mod p)`.
    pub fn satisfies(&self, x: &FieldElement, y: &FieldElement) -> bool {
        y.mul(y).eq(&self.rhs(x))
    }

    /// All `y` in the field with `y² = x³ + a·x + b (mod p)`.
    ///
    /// Returns zero, one, or two elements: empty if `x` is not on the
    /// curve, `{0}` if the right-hand side is zero, or `{y, p - y}`
    /// otherwise.
    pub fn y_candidates(&self, x: &FieldElement) -> Vec<FieldElement> {
        let v = self.rhs(x);
        if v.is_zero() {
            return vec![v];
        }

        let y = match sqrt_mod_p(v.value(), &self.p) {
            Some(y) => y,
            None => return Vec::new(),
        };

        let y = FieldElement::from_biguint(&y, &self.p);
        if !y.mul(&y).eq(&v) {
            return Vec::new();
        }

        let neg_y = y.neg();
        vec![y, neg_y]
    }
}

/// Finds a square root of `v` modulo the prime `p`, if one exists.
///
/// Uses the `p ≡ 3 (mod 4)` shortcut `y = v^((p+1)/4) mod p` when
/// applicable, and falls back to Tonelli–Shanks otherwise. The caller is
/// responsible for verifying `y² ≡ v (mod p)`, since a candidate computed
/// here for a non-residue `v` is meaningless.
pub fn sqrt_mod_p(v: &BigUint, p: &BigUint) -> Option<BigUint> {
    if v.is_zero() {
        return Some(BigUint::zero());
    }

    let four = BigUint::from(4u8);
    if p % &four == BigUint::from(3u8) {
        let exp = (p + BigUint::one()) / &four;
        let y = v.modpow(&exp, p);
        return if (&y * &y) % p == *v { Some(y) } else { None };
    }

    tonelli_shanks(v, p)
}

/// Tonelli–Shanks square root algorithm for `p ≡ 1 (mod 4)`.
fn tonelli_shanks(n: &BigUint, p: &BigUint) -> Option<BigUint> {
    let one = BigUint::one();
    let two = BigUint::from(2u8);

    // Euler's criterion: n must be a quadratic residue.
    let euler_exp = (p - &one) / &two;
    if n.modpow(&euler_exp, p) != one {
        return None;
    }

    // Factor p - 1 = q * 2^s with q odd.
    let mut q = p - &one;
    let mut s = 0u32;
    while (&q % &two).is_zero() {
        q /= &two;
        s += 1;
    }

    if s == 1 {
        // p ≡ 3 (mod 4); handled by the caller's shortcut, but kept
        // correct here too.
        let exp = (p + &one) / &BigUint::from(4u8);
        return Some(n.modpow(&exp, p));
    }

    // Find a quadratic non-residue z.
    let mut z = two.clone();
    while z.modpow(&euler_exp, p) != p - &one {
        z += &one;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = n.modpow(&q, p);
    let mut r = n.modpow(&((&q + &one) / &two), p);

    loop {
        if t == one {
            return Some(r);
        }

        // Find the least i, 0 < i < m, such that t^(2^i) == 1.
        let mut i = 0u32;
        let mut t2i = t.clone();
        while t2i != one {
            t2i = (&t2i * &t2i) % p;
            i += 1;
            if i == m {
                return None;
            }
        }

        let mut b = c.clone();
        for _ in 0..(m - i - 1) {
            b = (&b * &b) % p;
        }

        m = i;
        c = (&b * &b) % p;
        t = (&t * &c) % p;
        r = (&r * &b) % p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_singular_curve() {
        // a = 0, b = 0 has discriminant 0 for any p.
        let err = Curve::new(&BigInt::zero(), &BigInt::zero(), &BigUint::from(11u8)).unwrap_err();
        assert_eq!(err, Error::InvalidParameters);
    }

    #[test]
    fn tiny_curve_membership() {
        // y^2 = x^3 + x + 6 (mod 11)
        let curve = Curve::new(&BigInt::from(1), &BigInt::from(6), &BigUint::from(11u8)).unwrap();
        let x = curve.field_element(&BigInt::from(2));
        let y = curve.field_element(&BigInt::from(4));
        assert!(curve.satisfies(&x, &y));

        let bad_y = curve.field_element(&BigInt::from(5));
        assert!(!curve.satisfies(&x, &bad_y));
    }

    #[test]
    fn y_candidates_roundtrip_secp256k1_like_prime() {
        // p = 23 ≡ 3 (mod 4), curve y^2 = x^3 + 7 (toy parameters).
        let p = BigUint::from(23u8);
        let curve = Curve::new(&BigInt::zero(), &BigInt::from(7), &p).unwrap();
        for xi in 0u32..23 {
            let x = curve.field_element(&BigInt::from(xi));
            let candidates = curve.y_candidates(&x);
            for y in &candidates {
                assert!(curve.satisfies(&x, y));
            }
        }
    }
}
