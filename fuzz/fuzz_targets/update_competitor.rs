#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use glicko2::{Competitor, GameOutcome, RatingSystem, Score, ScoreDomain, VolatilityFormula};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ArbitraryCompetitor {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl ArbitraryCompetitor {
    fn into_clamped(self) -> Option<Competitor> {
        if self.rating.is_nan() || self.deviation.is_nan() || self.volatility.is_nan() {
            return None;
        }
        Competitor::new(
            self.rating.clamp(-10000.0, 10000.0),
            self.deviation.clamp(1.0, 1000.0),
            self.volatility.clamp(0.001, 1.0),
        )
        .ok()
    }
}

#[derive(Arbitrary, Debug)]
struct ArbitraryOutcome {
    opponent: ArbitraryCompetitor,
    score: f64,
}

#[derive(Arbitrary, Debug)]
struct Period {
    competitor: ArbitraryCompetitor,
    outcomes: Vec<ArbitraryOutcome>,
    tau: f64,
    legacy: bool,
}

fn assert_competitor(competitor: &Competitor) {
    assert!(competitor.rating().is_finite());
    assert!(competitor.deviation().is_finite() && competitor.deviation() > 0.0);
    assert!(competitor.volatility().is_finite() && competitor.volatility() > 0.0);
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(period) = Period::arbitrary(&mut u) else {
        return;
    };
    let Some(mut competitor) = period.competitor.into_clamped() else {
        return;
    };
    if period.tau.is_nan() {
        return;
    }

    let outcomes: Vec<GameOutcome> = period
        .outcomes
        .into_iter()
        .filter_map(|outcome| {
            let score = outcome.score;
            outcome
                .opponent
                .into_clamped()
                .map(|opponent| GameOutcome::against(&opponent, Score(score)))
        })
        .collect();

    let Ok(rating_system) = RatingSystem::builder()
        .tau(period.tau.clamp(0.1, 2.0))
        .score_domain(ScoreDomain::Continuous)
        .volatility_formula(if period.legacy {
            VolatilityFormula::Legacy
        } else {
            VolatilityFormula::Canonical
        })
        .build()
    else {
        return;
    };

    let before = competitor.clone();
    match rating_system.update(&mut competitor, &outcomes) {
        Ok(()) => assert_competitor(&competitor),
        Err(_) => assert_eq!(competitor, before),
    }
});
