//! Field arithmetic invariants (spec §8).

use becc::field::{mod_inverse, FieldElement};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

/// A prime large enough to exercise multi-limb `BigUint` arithmetic.
fn test_prime() -> BigUint {
    BigUint::parse_bytes(b"FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", 16).unwrap()
}

prop_compose! {
    fn field_element()(n in any::<u64>()) -> FieldElement {
        FieldElement::from_u64(n, &test_prime())
    }
}

proptest! {
    #[test]
    fn add_matches_sub_of_negation(a in field_element(), b in field_element()) {
        prop_assert_eq!(a.add(&b.neg()), a.sub(&b));
    }

    #[test]
    fn mul_by_inverse_is_one(n in 1u64..u64::MAX) {
        let p = test_prime();
        let a = FieldElement::from_u64(n, &p);
        if let Some(inv) = a.inv() {
            prop_assert!(a.mul(&inv).eq(&FieldElement::one(&p)));
        }
    }
}

#[test]
fn mod_inverse_concrete_vectors() {
    assert_eq!(mod_inverse(&BigInt::from(7), &BigInt::from(26)), Some(BigInt::from(15)));
    assert_eq!(mod_inverse(&BigInt::from(-11), &BigInt::from(13)), Some(BigInt::from(7)));
    assert_eq!(mod_inverse(&BigInt::from(0), &BigInt::from(17)), None);
}

#[test]
fn zero_has_no_inverse() {
    let p = test_prime();
    assert!(FieldElement::zero(&p).inv().is_none());
}
