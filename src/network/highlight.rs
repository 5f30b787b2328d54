use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::model::{GraphModel, Node};

fn node_matches(node: &Node, needle: &str) -> bool {
    node.display_name.to_lowercase().contains(needle)
        || node.title.to_lowercase().contains(needle)
        || node
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle))
}

/// Ids of nodes whose name, title or any skill contains `term`, ignoring case.
///
/// A blank term matches nothing. Otherwise the term is matched as typed,
/// surrounding spaces included.
pub fn search(term: &str, model: &GraphModel) -> HashSet<String> {
    if term.trim().is_empty() {
        return HashSet::new();
    }
    let needle = term.to_lowercase();

    model
        .all_nodes()
        .iter()
        .filter(|node| node_matches(node, &needle))
        .map(|node| node.id.clone())
        .collect()
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Orders `matches` for a result list: best fuzzy score on the display name
/// first, nodes that only matched on title or skills after, ties by name.
pub fn rank_matches<'a>(
    term: &str,
    model: &'a GraphModel,
    matches: &HashSet<String>,
) -> Vec<&'a Node> {
    let query = term.trim();
    let matcher = SkimMatcherV2::default();

    let mut ranked = model
        .all_nodes()
        .iter()
        .filter(|node| matches.contains(&node.id))
        .map(|node| {
            let score = fuzzy_match_score(&matcher, &node.display_name, query).unwrap_or(0);
            (score, node)
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.display_name.cmp(&b.1.display_name))
    });
    ranked.into_iter().map(|(_, node)| node).collect()
}
