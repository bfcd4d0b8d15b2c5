use crate::lyrics::types::{SearchCandidate, SelectedMatch};

/// Duration tolerance, in milliseconds, for a near-exact match.
const TIGHT_TOLERANCE_MS: u64 = 100;
/// Duration tolerance for the looser second pass.
const LOOSE_TOLERANCE_MS: u64 = 1_000;

/// Pick the best candidate for a track of the given duration.
///
/// Tolerance ladder: among candidates within ±100 ms of the target the *last*
/// one in input order wins; failing that, the last within ±1000 ms; failing
/// both, the first candidate outright. Only an empty list yields `None`.
///
/// "Last in tier wins" reproduces a latest-qualifying-candidate-overwrites
/// scan and is part of the observable contract, as is the first-candidate
/// fallback. Do not reorder or dedupe the input before calling this.
pub fn select_candidate(
    target_duration_ms: u64,
    candidates: &[SearchCandidate],
) -> Option<SelectedMatch> {
    let within = |tolerance: u64| {
        candidates
            .iter()
            .rfind(|c| c.duration_ms.abs_diff(target_duration_ms) <= tolerance)
    };

    let best = within(TIGHT_TOLERANCE_MS)
        .or_else(|| within(LOOSE_TOLERANCE_MS))
        .or_else(|| candidates.first())?;

    Some(SelectedMatch {
        id: best.id,
        raw: best.raw.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(id: u64, duration_ms: u64) -> SearchCandidate {
        SearchCandidate {
            id,
            duration_ms,
            raw: json!({ "id": id, "duration": duration_ms }),
        }
    }

    #[test]
    fn empty_list_is_no_match() {
        assert_eq!(select_candidate(200_000, &[]), None);
    }

    #[test]
    fn last_candidate_within_tight_tolerance_wins() {
        let candidates = vec![
            candidate(1, 200_050),
            candidate(2, 199_000),
            candidate(3, 200_090),
        ];
        let selected = select_candidate(200_000, &candidates).unwrap();
        assert_eq!(selected.id, 3);
    }

    #[test]
    fn loose_tolerance_applies_when_tight_has_no_match() {
        let candidates = vec![
            candidate(1, 190_000),
            candidate(2, 200_800),
            candidate(3, 199_500),
        ];
        let selected = select_candidate(200_000, &candidates).unwrap();
        // Both 2 and 3 are within ±1000 ms; the later one wins.
        assert_eq!(selected.id, 3);
    }

    #[test]
    fn falls_back_to_first_candidate_when_nothing_is_close() {
        let candidates = vec![candidate(1, 100_000), candidate(2, 300_000)];
        let selected = select_candidate(200_000, &candidates).unwrap();
        assert_eq!(selected.id, 1);
    }

    #[test]
    fn tolerance_bounds_are_inclusive() {
        let candidates = vec![candidate(1, 200_100), candidate(2, 201_000)];
        // 1 sits exactly on the tight bound and beats the loose-only match.
        let selected = select_candidate(200_000, &candidates).unwrap();
        assert_eq!(selected.id, 1);
    }

    #[test]
    fn carries_the_raw_payload_through() {
        let candidates = vec![candidate(7, 200_000)];
        let selected = select_candidate(200_000, &candidates).unwrap();
        assert_eq!(selected.raw["id"], 7);
    }
}
