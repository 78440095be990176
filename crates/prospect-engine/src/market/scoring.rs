/// Composite 0-10 opportunity score for a municipality or zone.
///
/// Population and market density are normalized onto a 0-10 scale and capped
/// so no single signal can blow out the composite; the crime factor carries
/// the largest weight because perceived risk is the primary driver of
/// security-service demand. Pure and total: absent crime data (index 0)
/// depresses the score instead of failing.
pub fn opportunity_index(population: u64, crime_index: f64, market_density: u64) -> f64 {
    let population_factor = (population as f64 / 50_000.0).min(10.0);
    let market_factor = (market_density as f64 / 1_000.0).min(10.0);

    let composite = 0.3 * population_factor + 0.4 * crime_index + 0.3 * market_factor;
    (composite * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_blend_to_expected_composite() {
        // factors: pop 500_000/50_000 = 10 (capped), crime 5.0, density 500/1_000 = 0.5
        let score = opportunity_index(500_000, 5.0, 500);
        assert_eq!(score, 0.3 * 10.0 + 0.4 * 5.0 + 0.3 * 0.5);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let score = opportunity_index(12_345, 3.3, 777);
        assert_eq!(score, (score * 100.0).round() / 100.0);
    }

    #[test]
    fn monotone_in_population() {
        let mut last = opportunity_index(0, 4.0, 400);
        for population in (0..=600_000).step_by(50_000) {
            let score = opportunity_index(population, 4.0, 400);
            assert!(score >= last, "population {population} regressed the score");
            last = score;
        }
    }

    #[test]
    fn monotone_in_crime_index() {
        let mut last = opportunity_index(100_000, 0.0, 400);
        for step in 0..=20 {
            let crime = f64::from(step) * 0.5;
            let score = opportunity_index(100_000, crime, 400);
            assert!(score >= last, "crime {crime} regressed the score");
            last = score;
        }
    }

    #[test]
    fn monotone_in_market_density() {
        let mut last = opportunity_index(100_000, 4.0, 0);
        for density in (0..=12_000).step_by(500) {
            let score = opportunity_index(100_000, 4.0, density);
            assert!(score >= last, "density {density} regressed the score");
            last = score;
        }
    }

    #[test]
    fn zero_inputs_score_zero() {
        assert_eq!(opportunity_index(0, 0.0, 0), 0.0);
    }
}
