//! Points on a [`Curve`] and the group law.

use std::sync::Arc;

use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use crate::curve::Curve;
use crate::field::FieldElement;

/// A point on a short-Weierstrass curve: either the identity (point at
/// infinity) or an affine `(x, y)` pair.
///
/// Every non-identity point is checked against its curve's equation at
/// construction time via [`Point::affine`]; there is no way to build an
/// off-curve `Point` through the public API.
#[derive(Clone, Debug)]
pub struct Point {
    curve: Arc<Curve>,
    coords: Coords,
}

#[derive(Clone, Debug)]
enum Coords {
    Identity,
    Affine { x: FieldElement, y: FieldElement },
}

impl Point {
    /// The identity element (point at infinity) of `curve`.
    pub fn identity(curve: Arc<Curve>) -> Self {
        Self {
            curve,
            coords: Coords::Identity,
        }
    }

    /// Builds an affine point, checking it lies on `curve`.
    ///
    /// Returns `None` if `(x, y)` does not satisfy the curve equation.
    pub fn affine(curve: Arc<Curve>, x: FieldElement, y: FieldElement) -> Option<Self> {
        if !curve.satisfies(&x, &y) {
            return None;
        }
        Some(Self {
            curve,
            coords: Coords::Affine { x, y },
        })
    }

    /// The curve this point belongs to.
    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    /// Whether this is the identity (point at infinity).
    pub fn is_identity(&self) -> bool {
        matches!(self.coords, Coords::Identity)
    }

    /// The affine `x` coordinate, or `None` for the identity.
    pub fn x(&self) -> Option<&FieldElement> {
        match &self.coords {
            Coords::Identity => None,
            Coords::Affine { x, .. } => Some(x),
        }
    }

    /// The affine `y` coordinate, or `None` for the identity.
    pub fn y(&self) -> Option<&FieldElement> {
        match &self.coords {
            Coords::Identity => None,
            Coords::Affine { y, .. } => Some(y),
        }
    }

    fn same_curve(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &other.curve) || self.curve == other.curve
    }

    /// Point negation: `(x, -y)`. Negating the identity yields the
    /// identity.
    pub fn negate(&self) -> Self {
        match &self.coords {
            Coords::Identity => self.clone(),
            Coords::Affine { x, y } => Self {
                curve: self.curve.clone(),
                coords: Coords::Affine {
                    x: x.clone(),
                    y: y.neg(),
                },
            },
        }
    }

    /// Point addition (including doubling), implementing the case table
    /// in spec §4.3.
    ///
    /// # Panics
    ///
    /// Panics if `self` and `other` belong to different curves — curve
    /// cross-talk is a programmer error, not a recoverable runtime
    /// condition (spec §9 "Curve cross-talk").
    pub fn add(&self, other: &Self) -> Self {
        assert!(
            self.same_curve(other),
            "cannot add points belonging to different curves"
        );

        let (px, py) = match &self.coords {
            Coords::Identity => return other.clone(),
            Coords::Affine { x, y } => (x, y),
        };
        let (qx, qy) = match &other.coords {
            Coords::Identity => return self.clone(),
            Coords::Affine { x, y } => (x, y),
        };

        if px.eq(qx) && !py.eq(qy) {
            return Self::identity(self.curve.clone());
        }

        let lambda = if px.eq(qx) && py.eq(qy) {
            if py.is_zero() {
                return Self::identity(self.curve.clone());
            }
            let numerator = px.mul(px).mul_int(3).add(self.curve.a());
            let denominator = py.mul_int(2).inv().expect("2y is invertible for y != 0");
            numerator.mul(&denominator)
        } else {
            let numerator = qy.sub(py);
            let denominator = qx.sub(px).inv().expect("x coordinates differ, so qx - px != 0");
            numerator.mul(&denominator)
        };

        let x3 = lambda.mul(&lambda).sub(px).sub(qx);
        let y3 = lambda.mul(&px.sub(&x3)).sub(py);

        Self {
            curve: self.curve.clone(),
            coords: Coords::Affine { x: x3, y: y3 },
        }
    }

    /// Scalar multiplication `k·P` via left-to-right double-and-add.
    ///
    /// Variable-time by design (spec §1 Non-goals exclude constant-time
    /// arithmetic). Negative `k` negates `P` first; `k = 0` returns the
    /// identity.
    pub fn scalar_mul(&self, k: &BigInt) -> Self {
        let (base, k) = if k.sign() == Sign::Minus {
            (self.negate(), (-k).to_biguint().expect("negated negative is non-negative"))
        } else {
            (self.clone(), k.to_biguint().expect("non-negative BigInt converts to BigUint"))
        };

        let mut result = Self::identity(self.curve.clone());
        if k.is_zero() {
            return result;
        }

        let bits = k.bits();
        for i in (0..bits).rev() {
            result = result.add(&result);
            if k.bit(i) {
                result = result.add(&base);
            }
        }

        result
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        if !self.same_curve(other) {
            return false;
        }
        match (&self.coords, &other.coords) {
            (Coords::Identity, Coords::Identity) => true,
            (Coords::Affine { x: x1, y: y1 }, Coords::Affine { x: x2, y: y2 }) => {
                x1.eq(x2) && y1.eq(y2)
            }
            _ => false,
        }
    }
}

impl Eq for Point {}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn tiny_curve() -> Arc<Curve> {
        // y^2 = x^3 + x + 6 (mod 11)
        Arc::new(Curve::new(&BigInt::from(1), &BigInt::from(6), &BigUint::from(11u8)).unwrap())
    }

    fn point(curve: &Arc<Curve>, x: i64, y: i64) -> Point {
        Point::affine(
            curve.clone(),
            curve.field_element(&BigInt::from(x)),
            curve.field_element(&BigInt::from(y)),
        )
        .expect("point must be on curve")
    }

    #[test]
    fn doubling_and_tripling_match_spec_vectors() {
        let curve = tiny_curve();
        let g = point(&curve, 2, 4);

        let doubled = g.scalar_mul(&BigInt::from(2));
        assert_eq!(doubled, point(&curve, 5, 9));

        let tripled = g.scalar_mul(&BigInt::from(3));
        assert_eq!(tripled, point(&curve, 8, 8));
    }

    #[test]
    fn add_negation_is_identity() {
        let curve = tiny_curve();
        let g = point(&curve, 2, 4);
        let sum = g.add(&g.negate());
        assert!(sum.is_identity());
    }

    #[test]
    fn doubling_point_with_y_zero_is_identity() {
        // y^2 = x^3 - x has (0, 0) as a point of order 2.
        let p = BigUint::from(23u8);
        let curve = Arc::new(Curve::new(&BigInt::from(-1), &BigInt::from(0), &p).unwrap());
        let zero = curve.field_element(&BigInt::from(0));
        let pt = Point::affine(curve, zero.clone(), zero).expect("(0,0) is on y^2=x^3-x");
        assert!(pt.add(&pt).is_identity());
    }

    #[test]
    fn scalar_mul_by_zero_is_identity() {
        let curve = tiny_curve();
        let g = point(&curve, 2, 4);
        assert!(g.scalar_mul(&BigInt::from(0)).is_identity());
    }

    #[test]
    fn scalar_mul_by_one_is_identity_point() {
        let curve = tiny_curve();
        let g = point(&curve, 2, 4);
        assert_eq!(g.scalar_mul(&BigInt::from(1)), g);
    }

    #[test]
    fn scalar_mul_by_negative_one_is_negation() {
        let curve = tiny_curve();
        let g = point(&curve, 2, 4);
        assert_eq!(g.scalar_mul(&BigInt::from(-1)), g.negate());
    }

    #[test]
    fn addition_is_commutative() {
        let curve = tiny_curve();
        let g = point(&curve, 2, 4);
        let h = g.scalar_mul(&BigInt::from(3));
        assert_eq!(g.add(&h), h.add(&g));
    }
}
