//! Randomized checks of negotiation invariants
//!
//! Preference and supported lists are drawn from a small media type pool so
//! overlaps, wildcards and zero weights all occur often. A fixed seed keeps
//! failures reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use represent_core::capabilities::{
    best_match, matching_media_type, negotiate, MediaRange, MediaTypeWeight, MediaTypeWeights,
};

const CONCRETE: &[&str] = &[
    "text/turtle",
    "text/n3",
    "text/plain",
    "application/ld+json",
    "application/n-quads",
    "application/trig",
    "image/png",
];

const WILDCARDS: &[&str] = &["text/*", "application/*", "image/*", "*/*"];

const ITERATIONS: usize = 500;

fn random_weight(rng: &mut StdRng) -> f32 {
    match rng.gen_range(0..10) {
        0 => 0.0,
        1 => 1.0,
        _ => (rng.gen_range(1..=100) as f32) / 100.0,
    }
}

fn random_weights(rng: &mut StdRng, pool: &[&str]) -> MediaTypeWeights {
    let count = rng.gen_range(0..=pool.len());
    let mut types: Vec<&str> = pool.choose_multiple(rng, count).copied().collect();
    types.shuffle(rng);

    let mut weights = MediaTypeWeights::new();
    for media_type in types {
        let weight = random_weight(rng);
        weights
            .insert(MediaTypeWeight::new(media_type, weight).unwrap())
            .unwrap();
    }
    weights
}

fn random_preferences(rng: &mut StdRng) -> MediaTypeWeights {
    let pool: Vec<&str> = CONCRETE.iter().chain(WILDCARDS).copied().collect();
    random_weights(rng, &pool)
}

#[test]
fn test_matches_are_supported_and_accepted() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..ITERATIONS {
        let prefs = random_preferences(&mut rng);
        let supported = random_weights(&mut rng, CONCRETE);

        let Ok(matches) = negotiate(&prefs, &supported) else {
            continue;
        };

        assert!(!matches.is_empty());
        for m in &matches {
            assert!(supported.get(&m.media_type) > 0.0, "{} not supported", m.media_type);
            assert!(m.score > 0.0);
            assert!(
                prefs
                    .iter()
                    .any(|p| p.weight() > 0.0 && matching_media_type(&p.media_type(), &m.media_type)),
                "{} not accepted by {:?}",
                m.media_type,
                prefs.describe()
            );
        }
    }
}

#[test]
fn test_matches_are_sorted_and_stable() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..ITERATIONS {
        let prefs = random_preferences(&mut rng);
        let supported = random_weights(&mut rng, CONCRETE);

        let Ok(matches) = negotiate(&prefs, &supported) else {
            continue;
        };

        let order: Vec<String> = supported.media_types();
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let first = order.iter().position(|t| *t == pair[0].media_type);
                let second = order.iter().position(|t| *t == pair[1].media_type);
                assert!(first < second, "tie broke supported order");
            }
        }
    }
}

#[test]
fn test_negotiation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..ITERATIONS {
        let prefs = random_preferences(&mut rng);
        let supported = random_weights(&mut rng, CONCRETE);

        assert_eq!(negotiate(&prefs, &supported), negotiate(&prefs, &supported));
    }
}

#[test]
fn test_disjoint_types_never_match() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..ITERATIONS {
        let (text, other): (Vec<&str>, Vec<&str>) =
            CONCRETE.iter().copied().partition(|t| t.starts_with("text/"));

        let prefs = random_weights(&mut rng, &text);
        let supported = random_weights(&mut rng, &other);

        let err = negotiate(&prefs, &supported).unwrap_err();
        assert_eq!(err.requested, prefs.describe());
        assert_eq!(err.supported, supported.describe());
    }
}

#[test]
fn test_best_match_is_head_of_negotiation() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..ITERATIONS {
        let prefs = random_preferences(&mut rng);
        let supported = random_weights(&mut rng, CONCRETE);

        match (negotiate(&prefs, &supported), best_match(&prefs, &supported)) {
            (Ok(all), Ok(best)) => assert_eq!(all[0], best),
            (Err(a), Err(b)) => assert_eq!(a, b),
            (all, best) => panic!("disagreement: {:?} vs {:?}", all, best),
        }
    }
}

#[test]
fn test_most_specific_preference_decides() {
    let mut rng = StdRng::seed_from_u64(31337);

    for _ in 0..ITERATIONS {
        let supported = random_weights(&mut rng, CONCRETE);
        let Some(target) = supported.iter().find(|e| e.weight() > 0.0) else {
            continue;
        };
        let target = target.range().clone();
        let main_wildcard = format!("{}/*", target.main_type());

        // Broad ranges accept everything, the exact entry rejects the target
        let prefs = MediaTypeWeights::from_pairs([
            ("*/*", 1.0),
            (main_wildcard.as_str(), 1.0),
            (target.to_string().as_str(), 0.0),
        ])
        .unwrap();

        if let Ok(matches) = negotiate(&prefs, &supported) {
            assert!(matches
                .iter()
                .all(|m| MediaRange::parse(&m.media_type).unwrap() != target));
        }
    }
}
