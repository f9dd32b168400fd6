//! Fit-recovery integration tests for vaxcast-arima.

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use vaxcast_arima::{ArimaSpec, difference};

fn generate_ar1(phi: f64, sigma2: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma2.sqrt()).unwrap();
    let mut data = vec![0.0; n];
    for t in 1..n {
        data[t] = phi * data[t - 1] + normal.sample(&mut rng);
    }
    data
}

fn generate_arma11(phi: f64, theta: f64, sigma2: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma2.sqrt()).unwrap();
    let mut data = vec![0.0; n];
    let mut eps = vec![0.0; n];
    for t in 0..n {
        eps[t] = normal.sample(&mut rng);
        let ar_part = if t > 0 { phi * data[t - 1] } else { 0.0 };
        let ma_part = if t > 0 { theta * eps[t - 1] } else { 0.0 };
        data[t] = ar_part + eps[t] + ma_part;
    }
    data
}

/// Cumulative sum starting at `start`.
fn integrate(start: f64, increments: &[f64]) -> Vec<f64> {
    let mut level = start;
    increments
        .iter()
        .map(|x| {
            level += x;
            level
        })
        .collect()
}

#[test]
fn ar1_recovery() {
    let phi = 0.7;
    let data = generate_ar1(phi, 1.0, 2000, 100);
    let fit = ArimaSpec::new(1, 0, 0).fit(&data).unwrap();
    assert!(
        (fit.ar()[0] - phi).abs() < 0.15,
        "AR(1) phi: expected ~{}, got {}",
        phi,
        fit.ar()[0]
    );
    assert!(fit.sigma2() > 0.5 && fit.sigma2() < 1.5);
    assert!(fit.log_likelihood().is_finite());
}

#[test]
fn arma11_recovery() {
    let phi = 0.5;
    let theta = 0.3;
    let data = generate_arma11(phi, theta, 1.0, 2000, 300);
    let fit = ArimaSpec::new(1, 0, 1).fit(&data).unwrap();
    assert!(
        (fit.ar()[0] - phi).abs() < 0.15,
        "ARMA(1,1) phi: expected ~{}, got {}",
        phi,
        fit.ar()[0]
    );
    assert!(
        (fit.ma()[0] - theta).abs() < 0.15,
        "ARMA(1,1) theta: expected ~{}, got {}",
        theta,
        fit.ma()[0]
    );
}

#[test]
fn arima110_recovery() {
    let phi = 0.6;
    let increments: Vec<f64> = generate_ar1(phi, 0.25, 1500, 500)
        .into_iter()
        .map(|x| x + 0.1)
        .collect();
    let data = integrate(50.0, &increments);
    let fit = ArimaSpec::new(1, 1, 0).fit(&data).unwrap();
    assert_eq!(fit.n_obs(), data.len() - 1);
    assert!(
        (fit.ar()[0] - phi).abs() < 0.15,
        "ARIMA(1,1,0) phi: expected ~{}, got {}",
        phi,
        fit.ar()[0]
    );
    assert!((fit.mean() - 0.1).abs() < 0.1, "drift = {}", fit.mean());
}

#[test]
fn differencing_then_fitting_matches() {
    // Fitting ARIMA(1,1,0) without constant is fitting AR(1) on the differences.
    let data = integrate(0.0, &generate_ar1(0.5, 1.0, 500, 600));
    let integrated = ArimaSpec::new(1, 1, 0).with_constant(false).fit(&data).unwrap();
    let direct = ArimaSpec::new(1, 0, 0)
        .with_constant(false)
        .fit(&difference(&data, 1))
        .unwrap();
    assert!((integrated.ar()[0] - direct.ar()[0]).abs() < 1e-9);
    assert!((integrated.log_likelihood() - direct.log_likelihood()).abs() < 1e-9);
}

#[test]
fn information_criteria_ordering() {
    let data = generate_ar1(0.5, 1.0, 300, 700);
    let fit = ArimaSpec::new(1, 0, 0).fit(&data).unwrap();
    // With n = 300 and k = 3, ln(n) > 2 so BIC penalises more than AIC.
    assert!(fit.bic() > fit.aic());
    assert!(fit.aicc() > fit.aic());
}
