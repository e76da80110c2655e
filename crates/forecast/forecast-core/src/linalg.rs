//! Dense linear algebra on row-major flat buffers

use forecast_spi::{ForecastError, Result};

/// Accumulate `XᵀX` (cols × cols) and `Xᵀy` for a row-major design matrix
pub fn normal_equations(x: &[f64], y: &[f64], cols: usize) -> (Vec<f64>, Vec<f64>) {
    let mut xtx = vec![0.0; cols * cols];
    let mut xty = vec![0.0; cols];

    for (row, &target) in x.chunks_exact(cols).zip(y.iter()) {
        for i in 0..cols {
            let xi = row[i];
            if xi == 0.0 {
                continue;
            }
            xty[i] += xi * target;
            for j in i..cols {
                xtx[i * cols + j] += xi * row[j];
            }
        }
    }

    // Mirror the upper triangle
    for i in 0..cols {
        for j in 0..i {
            xtx[i * cols + j] = xtx[j * cols + i];
        }
    }

    (xtx, xty)
}

/// Solve `a · x = b` for a symmetric positive definite `a` (n × n)
pub fn cholesky_solve(a: &[f64], b: &[f64], n: usize) -> Result<Vec<f64>> {
    if a.len() != n * n || b.len() != n {
        return Err(ForecastError::NumericalError(format!(
            "system dimensions do not match: {} coefficients, {} targets, n = {}",
            a.len(),
            b.len(),
            n
        )));
    }

    let mut l = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i * n + j];
            for k in 0..j {
                sum -= l[i * n + k] * l[j * n + k];
            }
            if i == j {
                if !sum.is_finite() || sum <= 0.0 {
                    return Err(ForecastError::NumericalError(format!(
                        "matrix is not positive definite at pivot {}",
                        i
                    )));
                }
                l[i * n + i] = sum.sqrt();
            } else {
                l[i * n + j] = sum / l[j * n + j];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[i * n + k] * z[k];
        }
        z[i] = sum / l[i * n + i];
    }

    // Back substitution: Lᵀ x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[k * n + i] * x[k];
        }
        x[i] = sum / l[i * n + i];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::NumericalError(
            "solution contains non-finite values".to_string(),
        ));
    }
    Ok(x)
}

/// Row-major matrix-vector product
pub fn mat_vec(x: &[f64], v: &[f64], cols: usize) -> Vec<f64> {
    x.chunks_exact(cols)
        .map(|row| row.iter().zip(v.iter()).map(|(a, b)| a * b).sum())
        .collect()
}
