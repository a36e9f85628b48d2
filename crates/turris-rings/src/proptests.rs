//! Property-based tests for the exact scalars.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::rational::Q;
    use crate::traits::{Field, Ring};

    fn small_q() -> impl Strategy<Value = Q> {
        ((-50i64..50i64), (1i64..20i64)).prop_map(|(n, d)| Q::from_i64(n, d))
    }

    proptest! {
        #[test]
        fn q_add_commutative(a in small_q(), b in small_q()) {
            prop_assert_eq!(a.clone() + b.clone(), b + a);
        }

        #[test]
        fn q_mul_associative(a in small_q(), b in small_q(), c in small_q()) {
            prop_assert_eq!((a.clone() * b.clone()) * c.clone(), a * (b * c));
        }

        #[test]
        fn q_distributive(a in small_q(), b in small_q(), c in small_q()) {
            let left = a.clone() * (b.clone() + c.clone());
            let right = a.clone() * b + a * c;
            prop_assert_eq!(left, right);
        }

        #[test]
        fn q_inverse_roundtrip(a in small_q()) {
            if !a.is_zero() {
                let inv = a.inv().unwrap();
                prop_assert!((a * inv).is_one());
            }
        }

        #[test]
        fn q_neg_cancels(a in small_q()) {
            prop_assert!((a.clone() + (-a)).is_zero());
        }
    }
}
