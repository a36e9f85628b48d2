//! Hensel lifting for polynomial factorization.
//!
//! Lifts a monic factorization modulo p to a factorization modulo p^k,
//! doubling the precision each iteration. The lifted factors come back
//! with coefficients in the symmetric range (-p^k/2, p^k/2].

use turris_poly::DensePoly;
use turris_rings::traits::Ring;
use turris_rings::Z;

/// Lifts a monic factorization of `f` from mod p to mod p^k.
///
/// `f` must be monic and its reduction mod p must equal the product of
/// `factors_mod_p`, which must be pairwise coprime mod p. Returns the
/// lifted factors with symmetric-range coefficients, together with the
/// final modulus p^k.
#[must_use]
pub fn hensel_lift(
    f: &DensePoly<Z>,
    factors_mod_p: &[DensePoly<Z>],
    p: u64,
    target_k: u32,
) -> (Vec<DensePoly<Z>>, Z) {
    let p_z = Z::new(p as i64);
    let final_modulus = p_z.pow(target_k);

    if factors_mod_p.len() <= 1 {
        return (vec![f.clone()], final_modulus);
    }

    let lifted = lift_tree(f, factors_mod_p, &p_z, target_k)
        .into_iter()
        .map(|g| symmetric_rep(&g, &final_modulus))
        .collect();

    (lifted, final_modulus)
}

/// Splits the factor list in half, lifts the two half-products as a
/// coprime pair, then recurses into each half.
fn lift_tree(f: &DensePoly<Z>, factors: &[DensePoly<Z>], p: &Z, target_k: u32) -> Vec<DensePoly<Z>> {
    if factors.len() == 1 {
        return vec![f.clone()];
    }

    let mid = factors.len() / 2;
    let left = factors_product(&factors[..mid], p);
    let right = factors_product(&factors[mid..], p);
    let (new_left, new_right) = lift_pair(f, &left, &right, p, target_k);

    let mut result = lift_tree(&new_left, &factors[..mid], p, target_k);
    result.extend(lift_tree(&new_right, &factors[mid..], p, target_k));
    result
}

/// Lifts a coprime monic pair from f ≡ g·h (mod p) to f ≡ g'·h'
/// (mod p^k), doubling the precision each step. The Bezout pair for
/// g, h is computed once over Z/p and lifted alongside the factors, so
/// every polynomial division along the way is by a monic divisor.
fn lift_pair(
    f: &DensePoly<Z>,
    g0: &DensePoly<Z>,
    h0: &DensePoly<Z>,
    p: &Z,
    target_k: u32,
) -> (DensePoly<Z>, DensePoly<Z>) {
    let (mut s, mut t) = bezout_mod(g0, h0, p);
    let (mut g, mut h) = (g0.clone(), h0.clone());
    let mut k = 1u32;

    while k < target_k {
        let next_k = (2 * k).min(target_k);
        let m = p.pow(next_k);

        // Factor step: correct g and h by the residual e = f - g·h.
        let e = poly_sub_mod(f, &poly_mul_mod(&g, &h, &m), &m);
        let (q, r) = poly_div_mod(&poly_mul_mod(&s, &e, &m), &h, &m);
        let te = poly_mul_mod(&t, &e, &m);
        g = poly_add_mod(&poly_add_mod(&g, &te, &m), &poly_mul_mod(&q, &g, &m), &m);
        h = poly_add_mod(&h, &r, &m);

        // Bezout step: correct s and t by the residual b = s·g + t·h - 1.
        let sg = poly_mul_mod(&s, &g, &m);
        let th = poly_mul_mod(&t, &h, &m);
        let b = poly_sub_mod(&poly_add_mod(&sg, &th, &m), &DensePoly::one(), &m);
        let (c, d) = poly_div_mod(&poly_mul_mod(&s, &b, &m), &h, &m);
        s = poly_sub_mod(&s, &d, &m);
        let tb = poly_mul_mod(&t, &b, &m);
        t = poly_sub_mod(&poly_sub_mod(&t, &tb, &m), &poly_mul_mod(&c, &g, &m), &m);

        k = next_k;
    }

    (g, h)
}

/// Extended Euclid over Z/p for coprime g, h: returns (s, t) with
/// s·g + t·h ≡ 1 (mod p). The modulus must be prime.
fn bezout_mod(g: &DensePoly<Z>, h: &DensePoly<Z>, m: &Z) -> (DensePoly<Z>, DensePoly<Z>) {
    let (mut r0, mut r1) = (g.clone(), h.clone());
    let (mut s0, mut s1) = (DensePoly::one(), DensePoly::zero());
    let (mut t0, mut t1) = (DensePoly::zero(), DensePoly::one());

    while !r1.is_zero() {
        let (q, r) = poly_div_mod(&r0, &r1, m);
        let s = poly_sub_mod(&s0, &poly_mul_mod(&q, &s1, m), m);
        let t = poly_sub_mod(&t0, &poly_mul_mod(&q, &t1, m), m);
        (r0, r1) = (r1, r);
        (s0, s1) = (s1, s);
        (t0, t1) = (t1, t);
    }

    let lead_inv = mod_inv(r0.leading_coeff(), m);
    (scale_mod(&s0, &lead_inv, m), scale_mod(&t0, &lead_inv, m))
}

fn reduce(x: &Z, m: &Z) -> Z {
    let r = x.clone() % m.clone();
    if r.is_negative() {
        r + m.clone()
    } else {
        r
    }
}

fn poly_add_mod(a: &DensePoly<Z>, b: &DensePoly<Z>, m: &Z) -> DensePoly<Z> {
    a.add(b).map_coeffs(|c| reduce(c, m))
}

fn poly_sub_mod(a: &DensePoly<Z>, b: &DensePoly<Z>, m: &Z) -> DensePoly<Z> {
    a.sub(b).map_coeffs(|c| reduce(c, m))
}

fn poly_mul_mod(a: &DensePoly<Z>, b: &DensePoly<Z>, m: &Z) -> DensePoly<Z> {
    a.mul(b).map_coeffs(|c| reduce(c, m))
}

fn scale_mod(a: &DensePoly<Z>, c: &Z, m: &Z) -> DensePoly<Z> {
    a.map_coeffs(|x| reduce(&(x.clone() * c.clone()), m))
}

/// Division with remainder mod m. The leading coefficient of `b` must
/// be invertible mod m; every caller past the initial Bezout
/// computation divides by a monic polynomial.
fn poly_div_mod(a: &DensePoly<Z>, b: &DensePoly<Z>, m: &Z) -> (DensePoly<Z>, DensePoly<Z>) {
    assert!(!b.is_zero(), "division by zero polynomial");

    if a.is_zero() || a.degree() < b.degree() {
        return (DensePoly::zero(), a.clone());
    }

    let lead_inv = mod_inv(b.leading_coeff(), m);
    let deg_diff = a.degree() - b.degree();
    let mut rem: Vec<Z> = a.coeffs().to_vec();
    let mut quot = vec![Z::new(0); deg_diff + 1];

    for i in (0..=deg_diff).rev() {
        let idx = i + b.degree();
        if rem[idx].is_zero() {
            continue;
        }
        let q = reduce(&(rem[idx].clone() * lead_inv.clone()), m);
        quot[i] = q.clone();
        for (j, bc) in b.coeffs().iter().enumerate() {
            rem[i + j] = reduce(&(rem[i + j].clone() - q.clone() * bc.clone()), m);
        }
    }

    (DensePoly::new(quot), DensePoly::new(rem))
}

/// Inverse of `a` mod `m` by extended Euclid.
///
/// # Panics
///
/// Panics if `a` is not invertible mod `m`.
fn mod_inv(a: &Z, m: &Z) -> Z {
    let (mut old_r, mut r) = (reduce(a, m), m.clone());
    let (mut old_s, mut s) = (Z::new(1), Z::new(0));

    while !Ring::is_zero(&r) {
        let q = old_r.clone() / r.clone();
        (old_r, r) = (r.clone(), old_r - q.clone() * r);
        (old_s, s) = (s.clone(), old_s - q * s);
    }

    assert!(Ring::is_one(&old_r), "element not invertible");
    reduce(&old_s, m)
}

fn factors_product(factors: &[DensePoly<Z>], m: &Z) -> DensePoly<Z> {
    factors
        .iter()
        .fold(DensePoly::one(), |acc, f| poly_mul_mod(&acc, f, m))
}

/// Maps coefficients into the symmetric range (-m/2, m/2].
fn symmetric_rep(f: &DensePoly<Z>, m: &Z) -> DensePoly<Z> {
    let half = m.clone() / Z::new(2);
    f.map_coeffs(|c| {
        let r = reduce(c, m);
        if r > half {
            r - m.clone()
        } else {
            r
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> DensePoly<Z> {
        DensePoly::new(coeffs.iter().map(|&c| Z::new(c)).collect())
    }

    #[test]
    fn test_mod_inv() {
        let m = Z::new(7);
        let inv = mod_inv(&Z::new(3), &m);
        assert_eq!(reduce(&(Z::new(3) * inv), &m), Z::new(1));
    }

    #[test]
    fn test_bezout() {
        let m = Z::new(5);
        let g = poly(&[4, 1]);
        let h = poly(&[1, 1]);
        let (s, t) = bezout_mod(&g, &h, &m);
        let lhs = poly_add_mod(&poly_mul_mod(&s, &g, &m), &poly_mul_mod(&t, &h, &m), &m);
        assert_eq!(lhs, DensePoly::one());
    }

    #[test]
    fn test_lift_x2_minus_1() {
        // x^2 - 1 = (x + 4)(x + 1) mod 5; lift to mod 625.
        let f = poly(&[-1, 0, 1]);
        let g = poly(&[4, 1]);
        let h = poly(&[1, 1]);

        let (lifted, modulus) = hensel_lift(&f, &[g, h], 5, 4);
        assert_eq!(modulus, Z::new(625));
        assert_eq!(lifted.len(), 2);

        // The true factors x - 1 and x + 1 are their own lifts.
        let prod = lifted[0].mul(&lifted[1]);
        assert_eq!(symmetric_rep(&prod, &modulus), f);
    }

    #[test]
    fn test_lift_three_factors() {
        // (x - 1)(x - 2)(x - 3) lifted from mod 7 to mod 2401.
        let f = poly(&[-6, 11, -6, 1]);
        let factors_p = vec![poly(&[6, 1]), poly(&[5, 1]), poly(&[4, 1])];

        let (lifted, modulus) = hensel_lift(&f, &factors_p, 7, 4);
        assert_eq!(lifted.len(), 3);

        let prod = lifted
            .iter()
            .fold(DensePoly::one(), |acc, g| acc.mul(g));
        assert_eq!(symmetric_rep(&prod, &modulus), f);
    }

    #[test]
    fn test_lift_past_the_first_doubling() {
        // (x^2 + 5x + 1)(x^2 + 2) reduces to (x^2 + 1)(x^2 + 2) mod 5.
        // Reaching mod 5^3 takes two precision steps, so the Bezout
        // data must stay valid beyond the prime modulus.
        let f = poly(&[2, 10, 3, 5, 1]);
        let factors_p = vec![poly(&[1, 0, 1]), poly(&[2, 0, 1])];

        let (lifted, modulus) = hensel_lift(&f, &factors_p, 5, 3);
        assert_eq!(modulus, Z::new(125));
        assert_eq!(lifted, vec![poly(&[1, 5, 1]), poly(&[2, 0, 1])]);

        let prod = lifted[0].mul(&lifted[1]);
        assert_eq!(symmetric_rep(&prod, &modulus), symmetric_rep(&f, &modulus));
    }
}
