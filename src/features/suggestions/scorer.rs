//! Keyword-overlap scoring of failure descriptions against the category
//! taxonomy.
//!
//! Every (main, sub) pair is a candidate. With the description lowercased:
//!
//! | Rule | Points |
//! |------|--------|
//! | description contains the main category name | 2 |
//! | description contains the sub-category name | 3 |
//! | each description word found inside the main name | 1 |
//! | each description word found inside the sub name | 1 |
//!
//! Zero-score candidates are dropped and the rest are ordered by score.
//! Equal scores keep the order the categories were supplied in.

use crate::features::categories::models::CategoryGroup;
use crate::features::suggestions::dtos::CategorySuggestionDto;
use crate::shared::constants::MAX_SUGGESTIONS;

const MAIN_NAME_POINTS: u32 = 2;
const SUB_NAME_POINTS: u32 = 3;
const WORD_POINTS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSuggestion {
    pub main_category: String,
    pub sub_category: String,
    pub score: u32,
}

impl From<RankedSuggestion> for CategorySuggestionDto {
    fn from(ranked: RankedSuggestion) -> Self {
        Self {
            main_category: ranked.main_category,
            sub_category: ranked.sub_category,
        }
    }
}

fn contains_name(haystack: &str, name: &str) -> bool {
    !name.is_empty() && haystack.contains(name)
}

/// Score one candidate. All inputs must already be lowercased.
pub fn score_pair(description: &str, words: &[&str], main: &str, sub: &str) -> u32 {
    let mut score = 0;

    if contains_name(description, main) {
        score += MAIN_NAME_POINTS;
    }
    if contains_name(description, sub) {
        score += SUB_NAME_POINTS;
    }

    for word in words {
        if main.contains(word) {
            score += WORD_POINTS;
        }
        if sub.contains(word) {
            score += WORD_POINTS;
        }
    }

    score
}

/// Rank every candidate with a positive score, keeping at most `limit`
pub fn rank(description: &str, categories: &[CategoryGroup], limit: usize) -> Vec<RankedSuggestion> {
    if description.trim().is_empty() {
        return Vec::new();
    }

    let description = description.to_lowercase();
    let words: Vec<&str> = description.split_whitespace().collect();

    let mut ranked = Vec::new();
    for group in categories {
        let main = group.main.to_lowercase();
        for sub_name in &group.subs {
            let sub = sub_name.to_lowercase();
            let score = score_pair(&description, &words, &main, &sub);
            if score > 0 {
                ranked.push(RankedSuggestion {
                    main_category: group.main.clone(),
                    sub_category: sub_name.clone(),
                    score,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in enumeration order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// Top suggestions for a description
pub fn suggest(description: &str, categories: &[CategoryGroup]) -> Vec<RankedSuggestion> {
    rank(description, categories, MAX_SUGGESTIONS)
}
