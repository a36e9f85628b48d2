//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::algorithms::gcd::{poly_div_rem, poly_gcd};
    use crate::dense::DensePoly;
    use turris_rings::Q;

    fn small_coeff() -> impl Strategy<Value = Q> {
        (-100i64..100i64).prop_map(Q::from_int)
    }

    fn small_poly() -> impl Strategy<Value = DensePoly<Q>> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(DensePoly::new)
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly<Q>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn poly_mul_associative(a in small_poly(), b in small_poly(), c in small_poly()) {
            prop_assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_mul_degree(a in nonzero_poly(), b in nonzero_poly()) {
            let product = a.mul(&b);
            prop_assert_eq!(product.degree(), a.degree() + b.degree());
        }

        #[test]
        fn poly_division_identity(a in small_poly(), b in nonzero_poly()) {
            // a = b*q + r with deg(r) < deg(b) or r = 0
            let (q, r) = poly_div_rem(&a, &b);
            prop_assert_eq!(b.mul(&q).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn poly_gcd_divides_both(a in nonzero_poly(), b in nonzero_poly()) {
            let g = poly_gcd(&a, &b);
            let (_, ra) = poly_div_rem(&a, &g);
            let (_, rb) = poly_div_rem(&b, &g);
            prop_assert!(ra.is_zero());
            prop_assert!(rb.is_zero());
        }
    }
}
