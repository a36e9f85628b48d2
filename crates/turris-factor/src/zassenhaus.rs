//! Zassenhaus factorization over the rationals.
//!
//! Squarefree decomposition, reduction to a monic integer polynomial,
//! modular factorization, Hensel lifting, and exhaustive subset
//! recombination. The recombination tries every subset size up to half
//! the modular factor count, so a single surviving factor is certified
//! irreducible.

use rayon::prelude::*;
use turris_poly::{make_monic, squarefree_decomposition, DensePoly};
use turris_rings::traits::{EuclideanDomain, Ring};
use turris_rings::{Q, Z};

use crate::hensel::hensel_lift;
use crate::modp;

/// A factorization over Q into monic irreducibles with multiplicities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QFactorization {
    /// The leading unit: the input equals `unit` times the product of
    /// the monic factors raised to their multiplicities.
    pub unit: Q,
    /// Monic irreducible factors with multiplicities.
    pub factors: Vec<(DensePoly<Q>, u32)>,
}

/// Factors a polynomial over Q into monic irreducibles.
#[must_use]
pub fn factor_q(f: &DensePoly<Q>) -> QFactorization {
    if f.is_zero() {
        return QFactorization {
            unit: Q::from_int(0),
            factors: vec![],
        };
    }

    let unit = f.leading_coeff().clone();
    if f.is_constant() {
        return QFactorization {
            unit,
            factors: vec![],
        };
    }

    let monic = make_monic(f);
    let mut factors = Vec::new();

    for (part, mult) in squarefree_decomposition(&monic) {
        if part.degree() == 0 {
            continue;
        }
        for g in factor_squarefree_monic(&part) {
            factors.push((g, mult));
        }
    }

    factors.sort_by(|a, b| {
        a.0.degree()
            .cmp(&b.0.degree())
            .then_with(|| format!("{:?}", a.0).cmp(&format!("{:?}", b.0)))
    });

    QFactorization { unit, factors }
}

/// Returns true if `f` is irreducible over Q.
///
/// Constants count as reducible, so a true result always names a
/// polynomial of degree at least one.
#[must_use]
pub fn is_irreducible_q(f: &DensePoly<Q>) -> bool {
    if f.is_zero() || f.is_constant() {
        return false;
    }
    if f.degree() == 1 {
        return true;
    }

    let fac = factor_q(f);
    fac.factors.len() == 1 && fac.factors[0].1 == 1
}

/// Factors a monic squarefree polynomial over Q of degree at least one.
fn factor_squarefree_monic(f: &DensePoly<Q>) -> Vec<DensePoly<Q>> {
    if f.degree() == 1 {
        return vec![f.clone()];
    }

    // Clear denominators to land in Z[x].
    let denom_lcm = f
        .coeffs()
        .iter()
        .fold(Z::new(1), |acc, c| lcm(&acc, &c.denominator()));
    let int_poly: DensePoly<Z> = f.map_coeffs(|c| {
        let scaled = c.clone() * Q::from_integer(denom_lcm.clone());
        scaled.to_integer().expect("denominators cleared")
    });

    // Monic transformation: F(y) = l^(n-1) f(y/l) has coefficients
    // F_j = a_j l^(n-1-j) and the factors of f are recovered from those
    // of F by substituting l x for y and rescaling to monic.
    let n = int_poly.degree();
    let lead = int_poly.leading_coeff().clone();
    let monic_int = DensePoly::new(
        int_poly
            .coeffs()
            .iter()
            .enumerate()
            .map(|(j, a)| {
                if j == n {
                    Z::new(1)
                } else {
                    a.clone() * lead.pow((n - 1 - j) as u32)
                }
            })
            .collect(),
    );

    factor_monic_squarefree_z(&monic_int)
        .into_iter()
        .map(|g| {
            let substituted = g.map_coeffs(|c| Q::from_integer(c.clone())).compose(
                &DensePoly::new(vec![Q::from_int(0), Q::from_integer(lead.clone())]),
            );
            make_monic(&substituted)
        })
        .collect()
}

/// Factors a monic squarefree polynomial in Z[x] into monic irreducibles.
fn factor_monic_squarefree_z(f: &DensePoly<Z>) -> Vec<DensePoly<Z>> {
    let n = f.degree();
    if n <= 1 {
        return vec![f.clone()];
    }

    let p = choose_prime(f);
    let f_mod: modp::PolyMod = modp::normalize(f.coeffs().iter().map(|c| c.mod_u64(p)).collect());
    let mod_factors = modp::factor_squarefree(&f_mod, p);

    if mod_factors.len() == 1 {
        return vec![f.clone()];
    }

    let bound = factor_coefficient_bound(f);
    let precision = compute_precision(p, &bound);

    let mod_factors_z: Vec<DensePoly<Z>> = mod_factors
        .iter()
        .map(|g| DensePoly::new(g.iter().map(|&c| Z::new(c as i64)).collect()))
        .collect();

    let (lifted, modulus) = hensel_lift(f, &mod_factors_z, p, precision);
    combine_factors(f, lifted, &modulus)
}

/// Picks a prime for which `f` stays squarefree after reduction.
fn choose_prime(f: &DensePoly<Z>) -> u64 {
    const PRIMES: [u64; 10] = [
        10007, 10009, 10037, 10039, 100003, 100019, 1000003, 1000033, 10000019, 100000007,
    ];

    for &p in &PRIMES {
        let f_mod = modp::normalize(f.coeffs().iter().map(|c| c.mod_u64(p)).collect());
        if modp::degree(&f_mod) == Some(f.degree()) && modp::is_squarefree(&f_mod, p) {
            return p;
        }
    }

    // A squarefree integer polynomial is squarefree mod all but finitely
    // many primes; walk upward until one works.
    let mut p = 100000007u64;
    loop {
        p = next_prime(p + 1);
        let f_mod = modp::normalize(f.coeffs().iter().map(|c| c.mod_u64(p)).collect());
        if modp::degree(&f_mod) == Some(f.degree()) && modp::is_squarefree(&f_mod, p) {
            return p;
        }
    }
}

fn next_prime(start: u64) -> u64 {
    let mut n = if start % 2 == 0 { start + 1 } else { start };
    loop {
        if is_prime(n) {
            return n;
        }
        n += 2;
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// A coefficient bound for the monic factors of `f`: any factor has
/// coefficients below (H + 1) 2^n (n + 1), with H the height of `f`.
fn factor_coefficient_bound(f: &DensePoly<Z>) -> Z {
    let height = f
        .coeffs()
        .iter()
        .fold(Z::new(0), |acc, c| if c.abs() > acc { c.abs() } else { acc });
    let n = f.degree() as u32;
    (height + Z::new(1)) * Z::new(2).pow(n) * Z::new(n as i64 + 1)
}

/// Smallest k with p^k > 2 * bound.
fn compute_precision(p: u64, bound: &Z) -> u32 {
    let target = Z::new(2) * bound.clone();
    let p_z = Z::new(p as i64);
    let mut power = p_z.clone();
    let mut k = 1u32;
    while power <= target {
        power = power * p_z.clone();
        k += 1;
    }
    k
}

/// Recombines Hensel-lifted modular factors into true integer factors.
///
/// Candidate subsets are tried in increasing size up to half the pool,
/// leftmost subset first, so the output is deterministic.
fn combine_factors(
    f: &DensePoly<Z>,
    mut pool: Vec<DensePoly<Z>>,
    modulus: &Z,
) -> Vec<DensePoly<Z>> {
    let mut remaining = f.clone();
    let mut out = Vec::new();
    let mut size = 1usize;

    while 2 * size <= pool.len() {
        let combos = combinations(pool.len(), size);
        let hit = combos.par_iter().find_map_first(|indices| {
            let candidate = subset_product(&pool, indices, modulus);
            divide_exact(&remaining, &candidate).map(|quot| (indices.clone(), candidate, quot))
        });

        match hit {
            Some((indices, factor, quot)) => {
                out.push(factor);
                remaining = quot;
                for &i in indices.iter().rev() {
                    pool.remove(i);
                }
            }
            None => size += 1,
        }
    }

    if remaining.degree() > 0 {
        out.push(remaining);
    }

    out.sort_by(|a, b| {
        a.degree()
            .cmp(&b.degree())
            .then_with(|| format!("{a:?}").cmp(&format!("{b:?}")))
    });
    out
}

/// All index subsets of {0, .., n-1} of the given size, lexicographic.
fn combinations(n: usize, size: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(size);
    fn rec(start: usize, n: usize, size: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            rec(i + 1, n, size, current, out);
            current.pop();
        }
    }
    rec(0, n, size, &mut current, &mut out);
    out
}

/// Product of the chosen pool entries, in the symmetric range mod modulus.
fn subset_product(pool: &[DensePoly<Z>], indices: &[usize], modulus: &Z) -> DensePoly<Z> {
    let half = modulus.clone() / Z::new(2);
    let prod = indices
        .iter()
        .fold(DensePoly::one(), |acc, &i| {
            acc.mul(&pool[i]).map_coeffs(|c| {
                let mut r = c.clone() % modulus.clone();
                if r.is_negative() {
                    r = r + modulus.clone();
                }
                r
            })
        });
    prod.map_coeffs(|c| {
        if c > &half {
            c.clone() - modulus.clone()
        } else {
            c.clone()
        }
    })
}

/// Divides `f` by the monic `g` over Z; `None` unless the division is exact.
fn divide_exact(f: &DensePoly<Z>, g: &DensePoly<Z>) -> Option<DensePoly<Z>> {
    if g.degree() > f.degree() || !g.leading_coeff().is_one() {
        return None;
    }

    let mut rem: Vec<Z> = f.coeffs().to_vec();
    let deg_diff = f.degree() - g.degree();
    let mut quot = vec![Z::new(0); deg_diff + 1];

    for i in (0..=deg_diff).rev() {
        let idx = i + g.degree();
        let q = rem[idx].clone();
        if Ring::is_zero(&q) {
            continue;
        }
        quot[i] = q.clone();
        for (j, gc) in g.coeffs().iter().enumerate() {
            rem[i + j] = rem[i + j].clone() - q.clone() * gc.clone();
        }
    }

    if rem.iter().all(Ring::is_zero) {
        Some(DensePoly::new(quot))
    } else {
        None
    }
}

fn lcm(a: &Z, b: &Z) -> Z {
    if Ring::is_zero(a) || Ring::is_zero(b) {
        return Z::new(0);
    }
    (a.clone() * b.clone() / a.gcd(b)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qpoly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::new(coeffs.iter().map(|&c| Q::from_int(c)).collect())
    }

    fn zpoly(coeffs: &[i64]) -> DensePoly<Z> {
        DensePoly::new(coeffs.iter().map(|&c| Z::new(c)).collect())
    }

    #[test]
    fn test_irreducible_quadratics() {
        assert!(is_irreducible_q(&qpoly(&[2, 0, 1]))); // x^2 + 2
        assert!(is_irreducible_q(&qpoly(&[3, 0, 1]))); // x^2 + 3
        assert!(is_irreducible_q(&qpoly(&[-2, 0, 1]))); // x^2 - 2
        assert!(!is_irreducible_q(&qpoly(&[-4, 0, 1]))); // (x-2)(x+2)
    }

    #[test]
    fn test_factor_product_of_linears() {
        // (x - 1)(x - 2)(x - 3)
        let f = qpoly(&[-6, 11, -6, 1]);
        let fac = factor_q(&f);
        assert_eq!(fac.unit, Q::from_int(1));
        assert_eq!(fac.factors.len(), 3);
        assert!(fac.factors.iter().all(|(g, m)| g.degree() == 1 && *m == 1));
    }

    #[test]
    fn test_factor_mixed_degrees() {
        // (x^2 + 1)(x - 5)
        let f = qpoly(&[1, 0, 1]).mul(&qpoly(&[-5, 1]));
        let fac = factor_q(&f);
        assert_eq!(fac.factors.len(), 2);
        let degrees: Vec<usize> = fac.factors.iter().map(|(g, _)| g.degree()).collect();
        assert_eq!(degrees, vec![1, 2]);
    }

    #[test]
    fn test_factor_with_multiplicity() {
        // (x + 1)^2 (x - 3)
        let f = qpoly(&[1, 1]).pow(2).mul(&qpoly(&[-3, 1]));
        let fac = factor_q(&f);
        assert_eq!(fac.factors.len(), 2);
        let mut mults: Vec<u32> = fac.factors.iter().map(|(_, m)| *m).collect();
        mults.sort_unstable();
        assert_eq!(mults, vec![1, 2]);
    }

    #[test]
    fn test_factor_non_monic() {
        // 2x^2 - 2 = 2 (x - 1)(x + 1)
        let f = qpoly(&[-2, 0, 2]);
        let fac = factor_q(&f);
        assert_eq!(fac.unit, Q::from_int(2));
        assert_eq!(fac.factors.len(), 2);
    }

    #[test]
    fn test_factor_rational_coefficients() {
        // (x - 1/2)(x + 3) expanded: x^2 + 5/2 x - 3/2
        let f = DensePoly::new(vec![
            Q::from_i64(-3, 2),
            Q::from_i64(5, 2),
            Q::from_int(1),
        ]);
        let fac = factor_q(&f);
        assert_eq!(fac.factors.len(), 2);
        let prod = fac
            .factors
            .iter()
            .fold(DensePoly::one(), |acc, (g, _)| acc.mul(g));
        assert_eq!(prod, f);
    }

    #[test]
    fn test_irreducible_quartic() {
        // x^4 + 1 is irreducible over Q though reducible mod every prime.
        assert!(is_irreducible_q(&qpoly(&[1, 0, 0, 0, 1])));
    }

    #[test]
    fn test_biquadratic_resultant_poly() {
        // x^4 - 10x^2 + 1, the minimal polynomial of sqrt(2) + sqrt(3).
        assert!(is_irreducible_q(&qpoly(&[1, 0, -10, 0, 1])));
    }

    #[test]
    fn test_reducible_quartic() {
        // (x^2 - 2)(x^2 - 3)
        let f = qpoly(&[-2, 0, 1]).mul(&qpoly(&[-3, 0, 1]));
        assert!(!is_irreducible_q(&f));
        let fac = factor_q(&f);
        assert_eq!(fac.factors.len(), 2);
        assert!(fac.factors.iter().all(|(g, _)| g.degree() == 2));
    }

    #[test]
    fn test_divide_exact() {
        let f = zpoly(&[-6, 11, -6, 1]);
        let g = zpoly(&[-1, 1]);
        let q = divide_exact(&f, &g).expect("x - 1 divides");
        assert_eq!(q.mul(&g), f);
        assert!(divide_exact(&f, &zpoly(&[7, 1])).is_none());
    }

    #[test]
    fn test_constants_and_zero() {
        assert!(!is_irreducible_q(&qpoly(&[5])));
        assert!(!is_irreducible_q(&DensePoly::zero()));
        let fac = factor_q(&qpoly(&[5]));
        assert_eq!(fac.unit, Q::from_int(5));
        assert!(fac.factors.is_empty());
    }
}
