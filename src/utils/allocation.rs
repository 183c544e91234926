//! Proportional allocation of annual totals across periods

use bigdecimal::BigDecimal;

use crate::types::*;

/// Distribute `total` across periods in proportion to `weights`
///
/// Every period but the last is rounded to cents; the last period takes whatever
/// remains, so the parts always sum to exactly `total`. The last part is not
/// rounded and can go negative when its weight is small relative to the rounding
/// residue of the earlier periods (0.02 over weights [1, 1, 1, 0] ends in -0.01).
pub fn allocate(total: &BigDecimal, weights: &[BigDecimal]) -> VerifierResult<Vec<BigDecimal>> {
    let zero = BigDecimal::from(0);

    if weights.is_empty() {
        return Err(VerifierError::Validation(
            "Allocation needs at least one period".to_string(),
        ));
    }

    if weights.iter().any(|w| *w < zero) {
        return Err(VerifierError::Validation(
            "Allocation weights cannot be negative".to_string(),
        ));
    }

    let total_weight: BigDecimal = weights.iter().sum();
    if total_weight == zero {
        return Err(VerifierError::Validation(
            "Allocation weights sum to zero".to_string(),
        ));
    }

    let last = weights.len() - 1;
    let mut parts = Vec::with_capacity(weights.len());
    let mut running = BigDecimal::from(0);

    for weight in &weights[..last] {
        let part = (total * weight / &total_weight).round(2);
        running += &part;
        parts.push(part);
    }
    parts.push(total - &running);

    Ok(parts)
}

/// Distribute `total` evenly across `periods`
pub fn allocate_evenly(total: &BigDecimal, periods: usize) -> VerifierResult<Vec<BigDecimal>> {
    let weights = vec![BigDecimal::from(1); periods];
    allocate(total, &weights)
}
