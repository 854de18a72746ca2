//! Loan and aid calculator.
//!
//! Pure functions projecting the cost of attendance, the Pell grant aid, the
//! net price and the federal loan limits year by year. Absent amounts are
//! treated as zero.

use rust_decimal::Decimal;

/// Maximum annual Pell grant award.
const MAX_PELL_GRANT: Decimal = Decimal::from_parts(6495, 0, 0, false, 0);

/// Minimum annual Pell grant award: smaller eligible awards aren't paid.
const MIN_PELL_GRANT: Decimal = Decimal::from_parts(650, 0, 0, false, 0);

/// Federal subsidized loan limits for the 1st, 2nd, and 3rd and further
/// years of study, regardless of the dependency status.
const FEDERAL_SUBSIDIZED_LOAN_LIMITS: [u32; 3] = [3500, 4500, 5500];

/// Federal unsubsidized loan limits of a dependent student for the 1st, 2nd,
/// and 3rd and further years of study.
const DEPENDENT_FEDERAL_UNSUBSIDIZED_LOAN_LIMITS: [u32; 3] = [2000, 2000, 2000];

/// Federal unsubsidized loan limits of an independent student for the 1st,
/// 2nd, and 3rd and further years of study.
const INDEPENDENT_FEDERAL_UNSUBSIDIZED_LOAN_LIMITS: [u32; 3] =
    [6000, 6000, 7000];

/// Annual costs of attendance along with their yearly raises.
///
/// Raises are fractions, so `0.03` means 3% a year.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CostInputs {
    /// Tuition and fees.
    pub tuition_and_fees: Decimal,

    /// Yearly raise of the tuition and fees.
    pub tuition_and_fees_raise: Decimal,

    /// Books and supplies.
    pub books_and_supplies: Decimal,

    /// Yearly raise of the books and supplies.
    pub books_and_supplies_raise: Decimal,

    /// Room and board.
    pub room_and_board: Decimal,

    /// Yearly raise of the room and board.
    pub room_and_board_raise: Decimal,

    /// Other living expenses.
    pub other_living_expenses: Decimal,

    /// Yearly raise of the other living expenses.
    pub other_living_expenses_raise: Decimal,
}

/// Federal loan limits by year of study.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoanLimitsInfo {
    /// Federal subsidized loan limits.
    pub federal_subsidized_loan_by_year: Vec<Decimal>,

    /// Federal unsubsidized loan limits.
    pub federal_unsubsidized_loan_by_year: Vec<Decimal>,
}

/// Projects the cost of attendance for each of the `years` of study.
///
/// Each cost grows compound-annually by its own raise. The compounding
/// starts `starting_year_delay` years before the first year of study, so
/// the delay shifts the base year without being charged. Costs saturate at
/// [`Decimal::MAX`].
#[must_use]
pub fn cost_of_attendance_by_year(
    inputs: &CostInputs,
    years: u8,
    starting_year_delay: u8,
) -> Vec<Decimal> {
    (0..years)
        .map(|year| {
            let n = u32::from(year) + u32::from(starting_year_delay);
            [
                (inputs.tuition_and_fees, inputs.tuition_and_fees_raise),
                (inputs.books_and_supplies, inputs.books_and_supplies_raise),
                (inputs.room_and_board, inputs.room_and_board_raise),
                (
                    inputs.other_living_expenses,
                    inputs.other_living_expenses_raise,
                ),
            ]
            .into_iter()
            .map(|(cost, raise)| cost.saturating_mul(compound(raise, n)))
            .fold(Decimal::ZERO, Decimal::saturating_add)
            .round_dp(2)
        })
        .collect()
}

/// Calculates the Pell grant aid for each of the `years` of study.
///
/// The award shrinks as the expected family contribution (`efc`) grows, is
/// scaled by the `participation` factor (`1` for full time, `0.5` for part
/// time) and never exceeds the cost of attendance of that year.
#[must_use]
pub fn pell_grant_aid_by_year(
    efc: Option<Decimal>,
    participation: Decimal,
    cost_of_attendance_by_year: &[Decimal],
    years: u8,
) -> Vec<Decimal> {
    let mut award = MAX_PELL_GRANT
        .saturating_sub(efc.unwrap_or_default())
        .max(Decimal::ZERO);
    if award < MIN_PELL_GRANT {
        award = Decimal::ZERO;
    }
    let award = award * participation;

    (0..usize::from(years))
        .map(|year| {
            let coa = cost_of_attendance_by_year
                .get(year)
                .copied()
                .unwrap_or_default();
            award.min(coa).max(Decimal::ZERO).round_dp(2)
        })
        .collect()
}

/// Calculates the net price for each of the `years` of study: the cost of
/// attendance left after all the grants and scholarships, never negative.
#[must_use]
pub fn net_price_by_year(
    cost_of_attendance_by_year: &[Decimal],
    grant_or_scholarship_aid_excluding_pell_grant: Decimal,
    pell_grant_aid_by_year: &[Decimal],
    years: u8,
) -> Vec<Decimal> {
    (0..usize::from(years))
        .map(|year| {
            let coa = cost_of_attendance_by_year
                .get(year)
                .copied()
                .unwrap_or_default();
            let pell =
                pell_grant_aid_by_year.get(year).copied().unwrap_or_default();
            coa.saturating_sub(grant_or_scholarship_aid_excluding_pell_grant)
                .saturating_sub(pell)
                .max(Decimal::ZERO)
        })
        .collect()
}

/// Returns the federal loan limits for each of the `years` of study.
#[must_use]
pub fn loan_limits_info(is_independent: bool, years: u8) -> LoanLimitsInfo {
    let unsubsidized = if is_independent {
        INDEPENDENT_FEDERAL_UNSUBSIDIZED_LOAN_LIMITS
    } else {
        DEPENDENT_FEDERAL_UNSUBSIDIZED_LOAN_LIMITS
    };
    let by_year = |limits: [u32; 3]| {
        (0..usize::from(years))
            .map(|year| Decimal::from(limits[year.min(2)]))
            .collect()
    };

    LoanLimitsInfo {
        federal_subsidized_loan_by_year: by_year(
            FEDERAL_SUBSIDIZED_LOAN_LIMITS,
        ),
        federal_unsubsidized_loan_by_year: by_year(unsubsidized),
    }
}

/// Computes `(1 + rate)^n` via iterative multiplication, saturating at
/// [`Decimal::MAX`].
fn compound(rate: Decimal, n: u32) -> Decimal {
    let factor = Decimal::ONE.saturating_add(rate);
    (0..n).fold(Decimal::ONE, |acc, _| acc.saturating_mul(factor))
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{
        cost_of_attendance_by_year, loan_limits_info, net_price_by_year,
        pell_grant_aid_by_year, CostInputs, MAX_PELL_GRANT,
    };

    fn inputs() -> CostInputs {
        CostInputs {
            tuition_and_fees: dec!(10000),
            tuition_and_fees_raise: dec!(0.03),
            books_and_supplies: dec!(1200),
            books_and_supplies_raise: dec!(0),
            room_and_board: dec!(8000),
            room_and_board_raise: dec!(0.02),
            other_living_expenses: dec!(0),
            other_living_expenses_raise: dec!(0),
        }
    }

    #[test]
    fn cost_of_attendance_compounds_yearly() {
        let coa = cost_of_attendance_by_year(&inputs(), 4, 0);

        assert_eq!(coa.len(), 4);
        assert_eq!(coa[0], dec!(19200));
        // 10000 * 1.03 + 1200 + 8000 * 1.02
        assert_eq!(coa[1], dec!(19660));
        // 10000 * 1.03^2 + 1200 + 8000 * 1.02^2
        assert_eq!(coa[2], dec!(20132.20));
    }

    #[test]
    fn cost_of_attendance_saturates_on_extreme_raises() {
        let inputs = CostInputs {
            tuition_and_fees_raise: dec!(0.25),
            room_and_board_raise: dec!(1000),
            ..inputs()
        };

        let coa = cost_of_attendance_by_year(&inputs, 255, 255);

        assert_eq!(coa.len(), 255);
        assert_eq!(coa[254], Decimal::MAX.round_dp(2));
        assert!(coa.windows(2).all(|w| w[0] <= w[1]));

        let net = net_price_by_year(&coa, dec!(-1), &[], 255);
        assert_eq!(net[254], Decimal::MAX.round_dp(2));
        assert_eq!(
            pell_grant_aid_by_year(Some(Decimal::MIN), dec!(1), &coa, 1),
            [MAX_PELL_GRANT.saturating_sub(Decimal::MIN).min(coa[0])],
        );
    }

    #[test]
    fn starting_year_delay_shifts_compounding() {
        let delayed = cost_of_attendance_by_year(&inputs(), 2, 1);
        let immediate = cost_of_attendance_by_year(&inputs(), 3, 0);

        assert_eq!(delayed, immediate[1..]);
    }

    #[test]
    fn no_years_means_no_cost() {
        assert!(cost_of_attendance_by_year(&inputs(), 0, 3).is_empty());
    }

    #[test]
    fn pell_grant_depends_on_efc_and_participation() {
        let coa = [dec!(20000), dec!(20000)];

        assert_eq!(
            pell_grant_aid_by_year(Some(dec!(0)), dec!(1), &coa, 2),
            [dec!(6495), dec!(6495)],
        );
        assert_eq!(
            pell_grant_aid_by_year(Some(dec!(3500)), dec!(1), &coa, 2),
            [dec!(2995), dec!(2995)],
        );
        assert_eq!(
            pell_grant_aid_by_year(Some(dec!(3500)), dec!(0.5), &coa, 1),
            [dec!(1497.5)],
        );
        assert_eq!(
            pell_grant_aid_by_year(None, dec!(1), &coa, 1),
            [dec!(6495)],
        );
    }

    #[test]
    fn pell_grant_is_floored_and_capped() {
        let coa = [dec!(3000), dec!(20000)];

        // Award below the minimum isn't paid.
        assert_eq!(
            pell_grant_aid_by_year(Some(dec!(6000)), dec!(1), &coa, 2),
            [dec!(0), dec!(0)],
        );
        assert_eq!(
            pell_grant_aid_by_year(Some(dec!(100000)), dec!(1), &coa, 1),
            [dec!(0)],
        );
        // Award never exceeds the cost of attendance.
        assert_eq!(
            pell_grant_aid_by_year(Some(dec!(0)), dec!(1), &coa, 2),
            [dec!(3000), dec!(6495)],
        );
    }

    #[test]
    fn net_price_is_never_negative() {
        let coa = [dec!(20000), dec!(5000), dec!(100)];
        let pell = [dec!(6495), dec!(5000), dec!(100)];

        assert_eq!(
            net_price_by_year(&coa, dec!(10000), &pell, 3),
            [dec!(3505), dec!(0), dec!(0)],
        );
        assert_eq!(
            net_price_by_year(&coa, dec!(1000000), &[], 3),
            [dec!(0), dec!(0), dec!(0)],
        );
    }

    #[test]
    fn loan_limits_per_year_of_study() {
        let dependent = loan_limits_info(false, 4);
        assert_eq!(
            dependent.federal_subsidized_loan_by_year,
            [dec!(3500), dec!(4500), dec!(5500), dec!(5500)],
        );
        assert_eq!(
            dependent.federal_unsubsidized_loan_by_year,
            [dec!(2000), dec!(2000), dec!(2000), dec!(2000)],
        );

        let independent = loan_limits_info(true, 3);
        assert_eq!(
            independent.federal_unsubsidized_loan_by_year,
            [dec!(6000), dec!(6000), dec!(7000)],
        );

        assert!(loan_limits_info(true, 0)
            .federal_subsidized_loan_by_year
            .is_empty());
    }
}
