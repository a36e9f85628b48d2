//! Polynomial arithmetic and factorization over Z/p for a runtime prime.
//!
//! Polynomials are coefficient vectors `Vec<u64>` in ascending degree order
//! with trailing zeros trimmed; the zero polynomial is the empty vector.
//! Products go through `u128`, so any prime below 2^63 is safe.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use turris_rings::Z;

/// A polynomial over Z/p, ascending coefficients, no trailing zeros.
pub type PolyMod = Vec<u64>;

/// Removes trailing zeros in place and returns the vector.
#[must_use]
pub fn normalize(mut v: PolyMod) -> PolyMod {
    while v.last() == Some(&0) {
        v.pop();
    }
    v
}

/// Degree of a normalized polynomial; `None` for the zero polynomial.
#[must_use]
pub fn degree(f: &PolyMod) -> Option<usize> {
    if f.is_empty() {
        None
    } else {
        Some(f.len() - 1)
    }
}

fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    let s = a + b;
    if s >= p {
        s - p
    } else {
        s
    }
}

fn sub_mod(a: u64, b: u64, p: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        a + p - b
    }
}

fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(p)) as u64
}

/// Modular inverse by the extended Euclidean algorithm.
///
/// # Panics
///
/// Panics if `a` is not invertible mod `p`.
#[must_use]
pub fn inv_mod(a: u64, p: u64) -> u64 {
    let (mut old_r, mut r) = (i128::from(a), i128::from(p));
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    assert!(old_r == 1, "element not invertible");
    (old_s.rem_euclid(i128::from(p))) as u64
}

/// Adds two polynomials mod p.
#[must_use]
pub fn poly_add(a: &PolyMod, b: &PolyMod, p: u64) -> PolyMod {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(add_mod(
            a.get(i).copied().unwrap_or(0),
            b.get(i).copied().unwrap_or(0),
            p,
        ));
    }
    normalize(out)
}

/// Subtracts two polynomials mod p.
#[must_use]
pub fn poly_sub(a: &PolyMod, b: &PolyMod, p: u64) -> PolyMod {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(sub_mod(
            a.get(i).copied().unwrap_or(0),
            b.get(i).copied().unwrap_or(0),
            p,
        ));
    }
    normalize(out)
}

/// Multiplies two polynomials mod p.
#[must_use]
pub fn poly_mul(a: &PolyMod, b: &PolyMod, p: u64) -> PolyMod {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }

    let mut out = vec![0u64; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] = add_mod(out[i + j], mul_mod(ai, bj, p), p);
        }
    }
    normalize(out)
}

/// Scales a polynomial by a constant mod p.
#[must_use]
pub fn poly_scale(a: &PolyMod, c: u64, p: u64) -> PolyMod {
    normalize(a.iter().map(|&x| mul_mod(x, c, p)).collect())
}

/// Makes a polynomial monic mod p.
#[must_use]
pub fn poly_monic(a: &PolyMod, p: u64) -> PolyMod {
    match a.last() {
        None => vec![],
        Some(&1) => a.clone(),
        Some(&lc) => poly_scale(a, inv_mod(lc, p), p),
    }
}

/// Division with remainder mod p: returns (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is zero.
#[must_use]
pub fn poly_div_rem(a: &PolyMod, b: &PolyMod, p: u64) -> (PolyMod, PolyMod) {
    assert!(!b.is_empty(), "division by zero polynomial");

    if a.len() < b.len() {
        return (vec![], a.clone());
    }

    let lead_inv = inv_mod(*b.last().expect("non-empty"), p);
    let mut rem = a.clone();
    let mut quot = vec![0u64; a.len() - b.len() + 1];

    for i in (0..quot.len()).rev() {
        let idx = i + b.len() - 1;
        if idx >= rem.len() || rem[idx] == 0 {
            continue;
        }
        let q = mul_mod(rem[idx], lead_inv, p);
        quot[i] = q;
        for (j, &bc) in b.iter().enumerate() {
            rem[i + j] = sub_mod(rem[i + j], mul_mod(q, bc, p), p);
        }
    }

    (normalize(quot), normalize(rem))
}

/// Monic GCD of two polynomials mod p.
#[must_use]
pub fn poly_gcd(a: &PolyMod, b: &PolyMod, p: u64) -> PolyMod {
    let mut f = a.clone();
    let mut g = b.clone();

    while !g.is_empty() {
        let (_, r) = poly_div_rem(&f, &g, p);
        f = g;
        g = r;
    }

    poly_monic(&f, p)
}

/// Extended GCD mod p: returns (g, s, t) with s*a + t*b = g, g monic.
#[must_use]
pub fn poly_extended_gcd(a: &PolyMod, b: &PolyMod, p: u64) -> (PolyMod, PolyMod, PolyMod) {
    let (mut r0, mut r1) = (a.clone(), b.clone());
    let (mut s0, mut s1) = (vec![1u64], vec![]);
    let (mut t0, mut t1) = (vec![], vec![1u64]);

    while !r1.is_empty() {
        let (q, r) = poly_div_rem(&r0, &r1, p);
        let s = poly_sub(&s0, &poly_mul(&q, &s1, p), p);
        let t = poly_sub(&t0, &poly_mul(&q, &t1, p), p);
        (r0, r1) = (r1, r);
        (s0, s1) = (s1, s);
        (t0, t1) = (t1, t);
    }

    if let Some(&lc) = r0.last() {
        if lc != 1 {
            let inv = inv_mod(lc, p);
            r0 = poly_scale(&r0, inv, p);
            s0 = poly_scale(&s0, inv, p);
            t0 = poly_scale(&t0, inv, p);
        }
    }

    (r0, s0, t0)
}

/// Computes the formal derivative mod p.
#[must_use]
pub fn poly_derivative(f: &PolyMod, p: u64) -> PolyMod {
    if f.len() <= 1 {
        return vec![];
    }
    normalize(
        f.iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| mul_mod(c, (i as u64) % p, p))
            .collect(),
    )
}

/// Computes a^e mod (f, p) with a big-integer exponent.
#[must_use]
pub fn poly_pow_mod(a: &PolyMod, e: &Z, f: &PolyMod, p: u64) -> PolyMod {
    let bits = e.bit_len();
    if bits == 0 {
        return vec![1];
    }

    let mut result = vec![1u64];
    for i in (0..bits).rev() {
        result = poly_div_rem(&poly_mul(&result, &result, p), f, p).1;
        if e.bit(i) {
            result = poly_div_rem(&poly_mul(&result, a, p), f, p).1;
        }
    }
    result
}

/// Returns true if f mod p is squarefree.
#[must_use]
pub fn is_squarefree(f: &PolyMod, p: u64) -> bool {
    match degree(f) {
        None => false,
        Some(0 | 1) => true,
        Some(_) => degree(&poly_gcd(f, &poly_derivative(f, p), p)) == Some(0),
    }
}

/// Factors a monic squarefree polynomial mod p into monic irreducibles.
///
/// Distinct-degree factorization followed by Cantor–Zassenhaus equal-degree
/// splitting. The random choices come from a fixed-seed `ChaCha8Rng`, so
/// the factor order is deterministic.
#[must_use]
pub fn factor_squarefree(f: &PolyMod, p: u64) -> Vec<PolyMod> {
    let Some(n) = degree(f) else {
        return vec![];
    };
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![poly_monic(f, p)];
    }

    let mut rng = ChaCha8Rng::seed_from_u64(0x7052_15u64);
    let mut factors = Vec::new();

    for (d, g) in distinct_degree(f, p) {
        let deg_g = degree(&g).expect("non-trivial component");
        if deg_g == d {
            factors.push(g);
        } else {
            equal_degree(&g, d, p, &mut rng, &mut factors);
        }
    }

    factors.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    factors
}

/// Distinct-degree factorization of a monic squarefree polynomial.
///
/// Returns pairs (d, product of the irreducible factors of degree d).
fn distinct_degree(f: &PolyMod, p: u64) -> Vec<(usize, PolyMod)> {
    let mut result = Vec::new();
    let mut h = poly_monic(f, p);
    let x = vec![0u64, 1];
    let mut x_pow = poly_div_rem(&x, &h, p).1;

    let mut d = 0usize;
    while let Some(deg_h) = degree(&h) {
        if deg_h == 0 {
            break;
        }
        d += 1;
        if deg_h < 2 * d {
            // What is left is itself irreducible.
            result.push((deg_h, h));
            break;
        }

        x_pow = poly_pow_mod(&x_pow, &Z::new(p as i64), &h, p);
        let diff = poly_sub(&x_pow, &x, p);
        let g = poly_gcd(&h, &diff, p);

        if degree(&g) > Some(0) {
            result.push((d, g.clone()));
            h = poly_div_rem(&h, &g, p).0;
            x_pow = poly_div_rem(&x_pow, &h, p).1;
        }
    }

    result
}

/// Cantor–Zassenhaus equal-degree splitting: every irreducible factor of
/// `f` has degree `d`; appends the monic irreducible factors to `out`.
fn equal_degree(f: &PolyMod, d: usize, p: u64, rng: &mut ChaCha8Rng, out: &mut Vec<PolyMod>) {
    let deg_f = degree(f).expect("non-constant");
    if deg_f == d {
        out.push(poly_monic(f, p));
        return;
    }

    // Exponent (p^d - 1) / 2, which overflows u64 already for modest d.
    let exp = (Z::new(p as i64).pow(d as u32) - Z::new(1)) / Z::new(2);

    loop {
        let a: PolyMod = normalize((0..deg_f).map(|_| rng.gen_range(0..p)).collect());
        if degree(&a).map_or(true, |deg| deg == 0) {
            continue;
        }

        let g = poly_gcd(f, &a, p);
        let split = if degree(&g).map_or(false, |deg| deg > 0) {
            g
        } else {
            let b = poly_pow_mod(&a, &exp, f, p);
            let b_minus_1 = poly_sub(&b, &vec![1u64], p);
            poly_gcd(f, &b_minus_1, p)
        };

        if let Some(deg_split) = degree(&split) {
            if deg_split > 0 && deg_split < deg_f {
                let other = poly_div_rem(f, &split, p).0;
                equal_degree(&split, d, p, rng, out);
                equal_degree(&other, d, p, rng, out);
                return;
            }
        }
    }
}
