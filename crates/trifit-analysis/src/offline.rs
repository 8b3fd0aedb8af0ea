//! Offline Estimator - local sizing when the vision service is unavailable
//!
//! Works from height, weight and race distance only; the image is ignored.
//! Broad shoulders and the suit model are drawn at random, so results are
//! only as deterministic as the seed.

use std::future::Future;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trifit_core::{AnalysisResult, CapturedImage, RaceDistance, TrifitResult, UserProfile};

use crate::AnalysisCollaborator;

/// Suit models the estimator picks from
pub const SUIT_MODELS: [&str; 3] = [
    "AeroPro race one-piece (low-drag coating)",
    "Endurance carbon-support long-distance cut",
    "HyperLight breathable race suit",
];

/// Suit size from height (cm) and BMI
pub fn recommend_size(height_cm: f32, bmi: f32) -> &'static str {
    if bmi < 19.0 {
        "S"
    } else if bmi < 24.0 {
        if height_cm < 168.0 {
            "S"
        } else if height_cm < 178.0 {
            "M"
        } else {
            "L"
        }
    } else if bmi < 28.0 {
        if height_cm < 175.0 {
            "L"
        } else {
            "XL"
        }
    } else {
        "XXL"
    }
}

/// (nutrition, race tip) for a race distance
pub fn race_strategy(event: RaceDistance) -> (&'static str, &'static str) {
    match event {
        RaceDistance::Sprint => (
            "Short and intense: a BCAA or caffeine gel 30 minutes before the start and a bottle of sports drink is enough, no solid food needed.",
            "Transitions decide sprint races. Practise sockless shoes-on-pedals mounts to win seconds in T1 and T2.",
        ),
        RaceDistance::Standard => (
            "Balance is everything: take a gel every 45 minutes on the bike and keep something back for the final 10K run.",
            "Hold a high cadence (around 90 rpm) on the bike to spare your legs for the run.",
        ),
        RaceDistance::Half => (
            "Stick to the fuelling plan: 60 g of carbohydrate per hour on the bike, plus salt tablets against cramps.",
            "Four to six hours in the suit makes comfort critical; choose a chamois that supports on the bike without chafing on the run.",
        ),
        RaceDistance::Full => (
            "Full distance is a battle of the gut. Alternate solid and liquid fuel to avoid stomach trouble late in the race.",
            "Finishing is about heart-rate control. Never surge on the bike; the marathon needs those legs.",
        ),
    }
}

/// Local fitting estimate
#[derive(Debug)]
pub struct OfflineEstimator {
    rng: Mutex<StdRng>,
}

impl OfflineEstimator {
    /// Estimator with a random seed
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Estimator with a fixed seed, for reproducible results
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }

    /// Produce an estimate for the profile
    pub fn estimate(&self, profile: &UserProfile) -> AnalysisResult {
        let height = profile.height_cm;
        let weight = profile.weight_kg;
        let bmi = profile.bmi();

        let (broad_draw, suit) = {
            let mut rng = self.rng.lock();
            (rng.gen::<f32>(), SUIT_MODELS[rng.gen_range(0..SUIT_MODELS.len())])
        };
        let is_broad = bmi > 22.0 && broad_draw > 0.4;
        let (nutrition, tip) = race_strategy(profile.event);

        let build = if is_broad {
            "shows a clear V-shape with a well developed upper body"
        } else {
            "is well balanced and suited to long endurance efforts"
        };
        let encouragement = if is_broad {
            "Born to wear a race suit! That V-shape is a real advantage in the swim. Stay confident and enjoy the race!"
        } else {
            "A textbook endurance build! Your light frame will pay off on the run, the ideal triathlete physique."
        };

        AnalysisResult {
            is_valid_pose: true,
            validation_message: None,
            size_recommendation: recommend_size(height, bmi).to_string(),
            is_broad_shoulders: is_broad,
            body_type_analysis: format!(
                "Based on {:.0}cm / {:.0}kg (BMI {:.1}), your build {}. The cut has been tuned to your shape.",
                height, weight, bmi, build
            ),
            strategy_suit: suit.to_string(),
            strategy_nutrition: nutrition.to_string(),
            strategy_tip: tip.to_string(),
            encouragement: encouragement.to_string(),
        }
    }
}

impl Default for OfflineEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisCollaborator for OfflineEstimator {
    fn analyze(
        &self,
        _image: &CapturedImage,
        profile: &UserProfile,
    ) -> impl Future<Output = TrifitResult<AnalysisResult>> + Send {
        let result = self.estimate(profile);
        async move { Ok(result) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(height_cm: f32, weight_kg: f32) -> UserProfile {
        UserProfile {
            height_cm,
            weight_kg,
            ..UserProfile::default()
        }
    }

    #[test]
    fn test_size_table() {
        assert_eq!(recommend_size(180.0, 18.5), "S");
        assert_eq!(recommend_size(165.0, 21.0), "S");
        assert_eq!(recommend_size(172.0, 21.0), "M");
        assert_eq!(recommend_size(185.0, 21.0), "L");
        assert_eq!(recommend_size(170.0, 26.0), "L");
        assert_eq!(recommend_size(180.0, 26.0), "XL");
        assert_eq!(recommend_size(170.0, 30.0), "XXL");
    }

    #[test]
    fn test_default_profile_is_medium() {
        let estimator = OfflineEstimator::seeded(7);
        let result = estimator.estimate(&profile(175.0, 70.0));

        assert!(result.is_valid_pose);
        assert_eq!(result.size_recommendation, "M");
        assert!(SUIT_MODELS.contains(&result.strategy_suit.as_str()));
        assert!(result.body_type_analysis.contains("175cm / 70kg"));
        assert!(result.body_type_analysis.contains("BMI 22.9"));
    }

    #[test]
    fn test_lean_athlete_never_broad() {
        let estimator = OfflineEstimator::seeded(1);
        for _ in 0..50 {
            assert!(!estimator.estimate(&profile(180.0, 65.0)).is_broad_shoulders);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = OfflineEstimator::seeded(42).estimate(&profile(182.0, 80.0));
        let b = OfflineEstimator::seeded(42).estimate(&profile(182.0, 80.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_strategy_follows_event() {
        let estimator = OfflineEstimator::seeded(3);
        let mut p = profile(175.0, 70.0);
        p.event = RaceDistance::Full;

        let result = estimator.estimate(&p);
        assert_eq!(result.strategy_nutrition, race_strategy(RaceDistance::Full).0);
        assert_eq!(result.strategy_tip, race_strategy(RaceDistance::Full).1);
    }
}
