use super::config::MatchingConfig;
use super::{FactorVerdict, MatchDimension, MatchFactor};
use crate::workflows::admissions::domain::{AcademicLevel, ChildProfile};
use crate::workflows::catalog::SchoolRecord;

/// Walk the rubric for one school. Factors are pushed in the fixed dimension
/// order (Age, Board, Distance, Fees, Academics, Competition, Rating) so the
/// explanation reads the same on every run.
pub(crate) fn score_school(
    profile: &ChildProfile,
    school: &SchoolRecord,
    config: &MatchingConfig,
) -> (Vec<MatchFactor>, i16) {
    let mut factors = Vec::new();
    let mut total = config.base_score;

    let expected_age = config.expected_age_for(&profile.target_class);
    let age_gap = (profile.age_years - expected_age).abs();
    if age_gap <= 0.5 {
        factors.push(MatchFactor {
            dimension: MatchDimension::Age,
            verdict: FactorVerdict::Positive,
            detail: format!(
                "age {:.1} fits the {} intake age of {:.0}",
                profile.age_years, profile.target_class, expected_age
            ),
        });
        total += 15;
    } else if age_gap <= 1.0 {
        factors.push(MatchFactor {
            dimension: MatchDimension::Age,
            verdict: FactorVerdict::Neutral,
            detail: format!(
                "age {:.1} is close to the {} intake age of {:.0}",
                profile.age_years, profile.target_class, expected_age
            ),
        });
        total += 8;
    } else {
        factors.push(MatchFactor {
            dimension: MatchDimension::Age,
            verdict: FactorVerdict::Negative,
            detail: format!(
                "age {:.1} is outside the usual {} intake window around {:.0}",
                profile.age_years, profile.target_class, expected_age
            ),
        });
        total -= 10;
    }

    if school.board == profile.preferred_board {
        factors.push(MatchFactor {
            dimension: MatchDimension::Board,
            verdict: FactorVerdict::Positive,
            detail: format!("offers the preferred {} curriculum", school.board),
        });
        total += 15;
    } else {
        factors.push(MatchFactor {
            dimension: MatchDimension::Board,
            verdict: FactorVerdict::Neutral,
            detail: format!(
                "follows {} rather than the preferred {}",
                school.board, profile.preferred_board
            ),
        });
    }

    if school.distance_km <= profile.max_distance_km {
        if school.distance_km <= config.near_distance_km {
            factors.push(MatchFactor {
                dimension: MatchDimension::Distance,
                verdict: FactorVerdict::Positive,
                detail: format!("{:.1} km away, an easy daily commute", school.distance_km),
            });
            total += 12;
        } else {
            factors.push(MatchFactor {
                dimension: MatchDimension::Distance,
                verdict: FactorVerdict::Neutral,
                detail: format!(
                    "{:.1} km away, inside the {:.0} km limit",
                    school.distance_km, profile.max_distance_km
                ),
            });
            total += 5;
        }
    } else {
        factors.push(MatchFactor {
            dimension: MatchDimension::Distance,
            verdict: FactorVerdict::Negative,
            detail: format!(
                "{:.1} km away, beyond the {:.0} km limit",
                school.distance_km, profile.max_distance_km
            ),
        });
        total -= 15;
    }

    if school.annual_fee <= profile.budget.max {
        if school.annual_fee >= profile.budget.min {
            factors.push(MatchFactor {
                dimension: MatchDimension::Fees,
                verdict: FactorVerdict::Positive,
                detail: format!("annual fee {} sits within budget", school.annual_fee),
            });
            total += 15;
        } else {
            factors.push(MatchFactor {
                dimension: MatchDimension::Fees,
                verdict: FactorVerdict::Positive,
                detail: format!("annual fee {} is below the planned budget", school.annual_fee),
            });
            total += 10;
        }
    } else {
        factors.push(MatchFactor {
            dimension: MatchDimension::Fees,
            verdict: FactorVerdict::Negative,
            detail: format!(
                "annual fee {} exceeds the budget cap of {}",
                school.annual_fee, profile.budget.max
            ),
        });
        total -= 20;
    }

    let (academic_verdict, academic_points) = match profile.academic_level {
        AcademicLevel::Excellent => (FactorVerdict::Positive, 10),
        AcademicLevel::AboveAverage => (FactorVerdict::Positive, 5),
        AcademicLevel::Average => (FactorVerdict::Neutral, 0),
        AcademicLevel::BelowAverage => (FactorVerdict::Negative, -5),
    };
    factors.push(MatchFactor {
        dimension: MatchDimension::Academics,
        verdict: academic_verdict,
        detail: format!(
            "{} academic record for the {} seat",
            profile.academic_level.label(),
            profile.target_class
        ),
    });
    total += academic_points;

    if school.is_popular {
        factors.push(MatchFactor {
            dimension: MatchDimension::Competition,
            verdict: FactorVerdict::Negative,
            detail: "popular school, admissions are more competitive".to_string(),
        });
        total -= 5;
    }

    if school.rating >= config.rating_spotlight {
        factors.push(MatchFactor {
            dimension: MatchDimension::Rating,
            verdict: FactorVerdict::Positive,
            detail: format!("parents rate this school {:.1} out of 5", school.rating),
        });
    }

    (factors, total)
}
