//! 1D root-finding solvers.
//!
//! The objective is fallible: every evaluation returns a [`Result`], and the
//! first error aborts the search. This lets a pricing engine sit directly
//! inside the objective (implied volatility).

use bsm_core::{
    errors::{Error, Result},
    Real,
};

const MAX_ITERATIONS: u32 = 100;
const DEFAULT_ACCURACY: Real = 1.0e-11;

fn effective_accuracy(accuracy: Real) -> Real {
    if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    }
}

fn not_bracketed(name: &str, a: Real, fa: Real, b: Real, fb: Real) -> Error {
    Error::ConvergenceFailure(format!(
        "{name}: root not bracketed, f({a}) = {fa} and f({b}) = {fb}"
    ))
}

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation. Fails
/// with [`Error::ConvergenceFailure`] when the end points do not bracket a
/// root or the iteration limit is hit.
pub fn brent<F>(mut f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    let acc = effective_accuracy(accuracy);
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if fa * fb > 0.0 || fa.is_nan() || fb.is_nan() {
        return Err(not_bracketed("Brent", a, fa, b, fb));
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                let p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                let q = (q - 1.0) * (r - 1.0) * (s - 1.0);
                (p, q)
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b)?;
    }
    Err(Error::ConvergenceFailure(format!(
        "Brent: no convergence after {MAX_ITERATIONS} iterations"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brent_sqrt2() {
        let root = brent(|x| Ok(x * x - 2.0), 0.0, 2.0, 1e-12).unwrap();
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-10, "root = {root}");
    }

    #[test]
    fn brent_cubic() {
        // x³ − x − 2 = 0  →  root ≈ 1.5214
        let root = brent(|x| Ok(x * x * x - x - 2.0), 1.0, 2.0, 1e-12).unwrap();
        assert!((root * root * root - root - 2.0).abs() < 1e-10);
    }

    #[test]
    fn brent_unbracketed_is_convergence_failure() {
        let err = brent(|x| Ok(x * x + 1.0), -1.0, 1.0, 1e-10).unwrap_err();
        assert!(matches!(err, Error::ConvergenceFailure(_)), "{err}");
    }

    #[test]
    fn objective_errors_propagate() {
        let err = brent(
            |x| {
                if x > 1.5 {
                    Err(Error::InvalidInput("out of domain".into()))
                } else {
                    Ok(x - 1.0)
                }
            },
            0.0,
            2.0,
            1e-10,
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn stateful_objective_counts_evaluations() {
        let mut calls = 0;
        let root = brent(
            |x| {
                calls += 1;
                Ok(x.exp() - 2.0)
            },
            0.0,
            1.0,
            1e-12,
        )
        .unwrap();
        assert!((root - 2.0_f64.ln()).abs() < 1e-10);
        assert!(calls > 2 && calls < 50, "calls = {calls}");
    }
}
