//! Deterministic best-match selection over label candidates.

use crate::models::label::LabelRecord;

const EXACT_MATCH_BONUS: i32 = 100;
const COMBINATION_PENALTY: i32 = 50;
const PEDIATRIC_PENALTY: i32 = 100;
const SUFFIX_PENALTY: i32 = 20;

const PEDIATRIC_TERMS: [&str; 2] = ["child", "pediatric"];
const SUFFIX_TERMS: [&str; 3] = ["hives", "allergy", "relief"];

fn is_combination(name: &str) -> bool {
    name.contains(" and ") || name.contains(" with ") || name.contains('/') || name.contains('+')
}

/// Heuristic relevance of one candidate for an already normalized query.
#[must_use]
pub fn score(query: &str, candidate: &LabelRecord) -> i32 {
    let names = candidate.all_names_lower();
    let is_exact = |list: &[String]| list.iter().any(|n| n.to_lowercase() == query);

    let mut score = 0;

    if is_exact(&candidate.openfda.generic_name) {
        score += EXACT_MATCH_BONUS;
    }
    if is_exact(&candidate.openfda.brand_name) {
        score += EXACT_MATCH_BONUS;
    }

    if !is_combination(query) && names.iter().any(|n| is_combination(n)) {
        score -= COMBINATION_PENALTY;
    }

    if !PEDIATRIC_TERMS.iter().any(|t| query.contains(t))
        && names.iter().any(|n| PEDIATRIC_TERMS.iter().any(|t| n.contains(t)))
    {
        score -= PEDIATRIC_PENALTY;
    }

    let unrequested_suffix = SUFFIX_TERMS
        .iter()
        .any(|t| !query.contains(t) && names.iter().any(|n| n.contains(t)));
    if unrequested_suffix {
        score -= SUFFIX_PENALTY;
    }

    score
}

fn shortest_name_len(candidate: &LabelRecord) -> usize {
    candidate
        .openfda
        .brand_name
        .iter()
        .chain(candidate.openfda.generic_name.iter())
        .map(|n| n.chars().count())
        .min()
        .unwrap_or(0)
}

/// Picks the highest scoring candidate. Ties go to the candidate with the
/// shorter shortest name, then to the earlier candidate.
#[must_use]
pub fn select_best<'a>(query: &str, candidates: &'a [LabelRecord]) -> Option<&'a LabelRecord> {
    let query = query.trim().to_lowercase();

    let mut ranked: Vec<(i32, usize, &LabelRecord)> = candidates
        .iter()
        .map(|c| (score(&query, c), shortest_name_len(c), c))
        .collect();

    // stable sort keeps input order for full ties
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    ranked.first().map(|(_, _, c)| *c)
}
