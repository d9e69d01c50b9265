//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64`; every calculation goes through `Decimal` and is
//! rounded back to 2 decimal places (half away from zero).

use rust_decimal::prelude::*;

use crate::models::Reduction;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal; NaN and infinities become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Derived amounts of one order line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTotals {
    /// quantite × prix_unitaire, before discount
    pub prix_initial: f64,
    /// After discount, tax included
    pub prix_total: f64,
    pub prix_total_ht: f64,
    pub montant_tva: f64,
    pub prix_total_ttc: f64,
}

/// Compute line totals.
///
/// `prix_unitaire` is tax included. A percentage discount applies to the
/// whole line; an amount discount is taken off the line and never makes it
/// negative. The VAT share is extracted from the discounted total.
///
/// Returns `None` if an intermediate amount overflows `Decimal`.
pub fn compute_line_totals(
    quantite: u32,
    prix_unitaire: f64,
    taux_tva: Option<f64>,
    reduction: Option<Reduction>,
) -> Option<LineTotals> {
    let initial = to_decimal(prix_unitaire).checked_mul(Decimal::from(quantite))?;

    let total = match reduction {
        Some(Reduction::Pourcentage(p)) => {
            let rate = to_decimal(p).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            initial
                .checked_mul(Decimal::ONE_HUNDRED - rate)?
                .checked_div(Decimal::ONE_HUNDRED)?
        }
        Some(Reduction::Montant(m)) => initial
            .checked_sub(to_decimal(m).max(Decimal::ZERO))?
            .max(Decimal::ZERO),
        None => initial,
    };

    let rate = taux_tva.map(to_decimal).unwrap_or_default().max(Decimal::ZERO);
    let ht = total
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(Decimal::ONE_HUNDRED.checked_add(rate)?)?;
    let tva = total - ht;

    Some(LineTotals {
        prix_initial: to_f64(initial),
        prix_total: to_f64(total),
        prix_total_ht: to_f64(ht),
        montant_tva: to_f64(tva),
        prix_total_ttc: to_f64(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_plain_line() {
        let t = compute_line_totals(3, 10.99, None, None).unwrap();
        assert_eq!(t.prix_initial, 32.97);
        assert_eq!(t.prix_total, 32.97);
        assert_eq!(t.prix_total_ht, 32.97);
        assert_eq!(t.montant_tva, 0.0);
    }

    #[test]
    fn test_percentage_discount_with_vat() {
        // 2 × 60 = 120, -25% = 90 TTC, 20% VAT -> 75 HT + 15 VAT
        let t = compute_line_totals(2, 60.0, Some(20.0), Some(Reduction::Pourcentage(25.0))).unwrap();
        assert_eq!(t.prix_initial, 120.0);
        assert_eq!(t.prix_total, 90.0);
        assert_eq!(t.prix_total_ht, 75.0);
        assert_eq!(t.montant_tva, 15.0);
        assert_eq!(t.prix_total_ttc, 90.0);
    }

    #[test]
    fn test_amount_discount_floors_at_zero() {
        let t = compute_line_totals(1, 5.0, None, Some(Reduction::Montant(8.0))).unwrap();
        assert_eq!(t.prix_total, 0.0);
    }

    #[test]
    fn test_percentage_above_hundred_is_clamped() {
        let t = compute_line_totals(1, 50.0, None, Some(Reduction::Pourcentage(150.0))).unwrap();
        assert_eq!(t.prix_total, 0.0);
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(compute_line_totals(1, 1e27, None, Some(Reduction::Pourcentage(10.0))), None);
        assert_eq!(compute_line_totals(u32::MAX, 1e27, None, None), None);
    }

    #[test]
    fn test_largest_accepted_line() {
        let t = compute_line_totals(u32::MAX, 1e9, Some(20.0), Some(Reduction::Pourcentage(10.0)));
        assert!(t.is_some());
    }
}
