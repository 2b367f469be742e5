use crate::record::{Observation, Taxon};
use log::info;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Ranks taxa search results to find the best match for an animal name.
///
/// Rules, first hit wins, and each rule scans the whole candidate list
/// before falling through to the next:
/// 1. Exact common name match
/// 2. Exact scientific name match
/// 3. Partial common name match
///     a) Species rank
///     b) Other ranks (genus, family, etc.)
/// 4. First result from the original search
///
/// Comparison is lowercase on both sides with no trimming.
pub fn find_best_match<'a>(candidates: &'a [Taxon], animal_name: &str) -> Option<&'a Taxon> {
    if candidates.is_empty() {
        return None;
    }

    let animal_name = animal_name.to_lowercase();

    // 1: Exact common name match
    if let Some(taxon) = candidates.iter().find(|taxon| {
        taxon
            .preferred_common_name
            .as_deref()
            .is_some_and(|common| common.to_lowercase() == animal_name)
    }) {
        info!(
            "Found exact common name match: {} ({})",
            taxon.name,
            taxon.display_name()
        );
        return Some(taxon);
    }

    // 2: Exact scientific name match
    if let Some(taxon) = candidates
        .iter()
        .find(|taxon| taxon.name.to_lowercase() == animal_name)
    {
        info!("Found exact scientific name match: {}", taxon.name);
        return Some(taxon);
    }

    // 3: Partial common name match, split by rank, search order preserved
    let mut species_matches = Vec::new();
    let mut other_matches = Vec::new();

    for taxon in candidates {
        let common = taxon
            .preferred_common_name
            .as_deref()
            .unwrap_or("")
            .to_lowercase();

        if common.contains(&animal_name) {
            if taxon.rank == "species" {
                species_matches.push(taxon);
            } else {
                other_matches.push(taxon);
            }
        }
    }

    // a) Species rank
    if let Some(&taxon) = species_matches.first() {
        info!(
            "Found species-level partial match: {} ({})",
            taxon.name,
            taxon.display_name()
        );
        return Some(taxon);
    }

    // b) Other ranks
    if let Some(&taxon) = other_matches.first() {
        info!(
            "Found partial match: {} ({})",
            taxon.name,
            taxon.display_name()
        );
        return Some(taxon);
    }

    // 4: First result from the original search
    let taxon = &candidates[0];
    info!(
        "No exact match, using first animal result: {} ({})",
        taxon.name,
        taxon.display_name()
    );
    Some(taxon)
}

/// Uniform pick from a page of observations. The API already randomises
/// the page order, so this composes with it rather than taking the head.
pub fn choose_observation<'a, R: Rng + ?Sized>(
    page: &'a [Observation],
    rng: &mut R,
) -> Option<&'a Observation> {
    page.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Observer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn taxon(id: u64, name: &str, common: Option<&str>, rank: &str) -> Taxon {
        Taxon {
            id,
            name: name.to_string(),
            preferred_common_name: common.map(str::to_string),
            rank: rank.to_string(),
            iconic_taxon_name: Some("Mammalia".to_string()),
        }
    }

    fn observation(id: u64) -> Observation {
        Observation {
            id,
            taxon: None,
            photos: Vec::new(),
            place_guess: None,
            user: Observer {
                login: "tester".to_string(),
            },
            observed_on_string: None,
        }
    }

    #[test]
    fn test_empty_candidates_returns_none() {
        assert!(find_best_match(&[], "xyzzynotananimal").is_none());
    }

    #[test]
    fn test_exact_common_name_beats_exact_scientific_name() {
        let candidates = vec![
            taxon(1, "Canis lupus", Some("Gray Wolf"), "species"),
            taxon(2, "Canis latrans", Some("Canis lupus"), "species"),
        ];

        let best = find_best_match(&candidates, "canis lupus").unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn test_exact_common_name_beats_species_partial() {
        // The genus-rank "deer" is an exact common name match and must win
        // over the species-rank partial match listed first.
        let candidates = vec![
            taxon(1, "Odocoileus virginianus", Some("White-tailed Deer"), "species"),
            taxon(2, "Cervus", Some("deer"), "genus"),
        ];

        let best = find_best_match(&candidates, "deer").unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn test_exact_scientific_name_match() {
        let candidates = vec![
            taxon(1, "Puma concolor", Some("Mountain Lion"), "species"),
            taxon(2, "Lynx rufus", Some("Bobcat"), "species"),
        ];

        let best = find_best_match(&candidates, "Lynx Rufus").unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn test_species_partial_match() {
        let candidates = vec![taxon(1, "Canis lupus", Some("Gray Wolf"), "species")];

        let best = find_best_match(&candidates, "wolf").unwrap();
        assert_eq!(best.id, 1);
    }

    #[test]
    fn test_species_partial_beats_other_rank_partial_regardless_of_order() {
        let candidates = vec![
            taxon(1, "Cervidae", Some("Deer and relatives"), "family"),
            taxon(2, "Odocoileus virginianus", Some("White-tailed deer"), "species"),
        ];

        let best = find_best_match(&candidates, "deer").unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn test_partial_match_falls_back_to_other_ranks() {
        let candidates = vec![
            taxon(1, "Picidae", Some("Woodpeckers"), "family"),
            taxon(2, "Dryobates pubescens", Some("Downy Flicker"), "species"),
        ];

        let best = find_best_match(&candidates, "woodpecker").unwrap();
        assert_eq!(best.id, 1);
    }

    #[test]
    fn test_first_within_tier_wins() {
        let candidates = vec![
            taxon(1, "Ursus arctos", Some("Brown Bear"), "species"),
            taxon(2, "Ursus americanus", Some("Black Bear"), "species"),
        ];

        let best = find_best_match(&candidates, "bear").unwrap();
        assert_eq!(best.id, 1);
    }

    #[test]
    fn test_fallback_to_first_result() {
        let candidates = vec![
            taxon(1, "Alces alces", Some("Moose"), "species"),
            taxon(2, "Cervus canadensis", Some("Elk"), "species"),
        ];

        let best = find_best_match(&candidates, "wapiti").unwrap();
        assert_eq!(best.id, 1);
    }

    #[test]
    fn test_no_whitespace_trimming() {
        // A padded input neither equals nor is contained in "Moose", so
        // the resolver drops through to the first-result fallback.
        let candidates = vec![
            taxon(1, "Alces alces", Some("Moose"), "species"),
            taxon(2, "Cervus canadensis", Some("Elk"), "species"),
        ];

        let best = find_best_match(&candidates, " elk ").unwrap();
        assert_eq!(best.id, 1);
    }

    #[test]
    fn test_missing_common_name_only_matches_scientific() {
        let candidates = vec![taxon(1, "Architeuthis dux", None, "species")];

        let best = find_best_match(&candidates, "architeuthis dux").unwrap();
        assert_eq!(best.id, 1);
    }

    #[test]
    fn test_choose_observation_empty_page() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(choose_observation(&[], &mut rng).is_none());
    }

    #[test]
    fn test_choose_observation_is_uniform() {
        let page: Vec<Observation> = (0..5).map(observation).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 5];

        for _ in 0..5000 {
            let picked = choose_observation(&page, &mut rng).unwrap();
            counts[picked.id as usize] += 1;
        }

        for count in counts {
            assert!((800..=1200).contains(&count), "skewed count: {count}");
        }
    }
}
