//! Fonctions mathématiques partagées

/// Borne une valeur dans [0, 1] (NaN devient 0)
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Moyenne arithmétique (0.0 pour une liste vide)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance de population (0.0 pour moins de deux valeurs)
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Écart type de population
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Maximum (0.0 pour une liste vide)
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(None, |acc: Option<f64>, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
    .unwrap_or(0.0)
}
