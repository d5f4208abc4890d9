//! Ordinary least squares on a set of basis functions.
//!
//! The continuation-value fit of the Longstaff-Schwartz engine. The normal
//! equations are avoided; the design matrix is decomposed by SVD, and a
//! numerically rank-deficient design is reported as
//! [`Error::NumericalDegeneracy`] rather than silently resolved with a
//! minimum-norm solution, so the caller can skip the fit.

use bsm_core::{
    ensure,
    errors::{Error, Result},
    Real,
};
use nalgebra::{DMatrix, DVector};

/// A fitted linear model `y ≈ A β`.
#[derive(Debug, Clone)]
pub struct LinearLeastSquaresRegression {
    coefficients: DVector<Real>,
    fitted: DVector<Real>,
    residuals: DVector<Real>,
}

impl LinearLeastSquaresRegression {
    /// Regress `y` on `basis[j](x)` for every basis function `j`.
    pub fn new<F>(x: &[Real], y: &[Real], basis: &[F]) -> Result<Self>
    where
        F: Fn(Real) -> Real,
    {
        ensure!(
            x.len() == y.len(),
            "regressor and response lengths differ: {} vs {}",
            x.len(),
            y.len()
        );
        ensure!(!basis.is_empty(), "regression needs at least one basis function");
        let design = DMatrix::from_fn(x.len(), basis.len(), |i, j| basis[j](x[i]));
        Self::from_design_matrix(design, y)
    }

    /// Regress `y` on the columns of an `n × m` design matrix.
    ///
    /// Fails with [`Error::NumericalDegeneracy`] when `n < m`, when any
    /// entry is non-finite, or when the singular values drop below
    /// `max(n, m) · ε · σ_max`.
    pub fn from_design_matrix(design: DMatrix<Real>, y: &[Real]) -> Result<Self> {
        let (rows, cols) = design.shape();
        ensure!(
            y.len() == rows,
            "{} responses for a design matrix with {rows} rows",
            y.len()
        );
        ensure!(cols > 0, "design matrix has no columns");
        let degenerate = |msg: String| Err(Error::NumericalDegeneracy(msg));
        if rows < cols {
            return degenerate(format!("{cols} coefficients from {rows} observations"));
        }
        if design.iter().chain(y).any(|v| !v.is_finite()) {
            return degenerate("regression data contain non-finite values".into());
        }

        let y = DVector::from_column_slice(y);
        let svd = design.clone().svd(true, true);
        let largest = svd.singular_values.max();
        let tolerance = rows.max(cols) as Real * Real::EPSILON * largest;
        let rank = svd.rank(tolerance);
        if largest == 0.0 || rank < cols {
            return degenerate(format!("design matrix has rank {rank}, needs {cols}"));
        }
        let coefficients = svd
            .solve(&y, tolerance)
            .map_err(|e| Error::NumericalDegeneracy(e.to_string()))?;

        let fitted = &design * &coefficients;
        let residuals = y - &fitted;
        Ok(Self {
            coefficients,
            fitted,
            residuals,
        })
    }

    /// β, one per column of the design.
    pub fn coefficients(&self) -> &[Real] {
        self.coefficients.as_slice()
    }

    /// `A β` at each observation.
    pub fn fitted_values(&self) -> &[Real] {
        self.fitted.as_slice()
    }

    /// `y − A β` at each observation.
    pub fn residuals(&self) -> &[Real] {
        self.residuals.as_slice()
    }

    /// Coefficient of determination against the responses the model was fitted to.
    pub fn r_squared(&self, y: &[Real]) -> Real {
        if y.is_empty() {
            return 0.0;
        }
        let mean = y.iter().sum::<Real>() / y.len() as Real;
        let total: Real = y.iter().map(|v| (v - mean) * (v - mean)).sum();
        let unexplained = self.residuals.norm_squared();
        if total == 0.0 {
            1.0
        } else {
            1.0 - unexplained / total
        }
    }
}
