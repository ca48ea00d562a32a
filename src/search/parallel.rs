//! Batch Resolution
//!
//! Resolves many addresses against one validated document. With the
//! `parallel` feature the batch is spread over Rayon's pool; the validation
//! and document are only read.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::indexed::ValidatedSearchResolver;
use super::resolver::SearchResponse;
use super::step::SearchStep;
use crate::index::Validation;
use serde_json::Value;

/// Resolve every address in `searches`, keeping their order
#[cfg(feature = "parallel")]
pub fn resolve_all<'a, S>(
    resolver: &ValidatedSearchResolver,
    validation: &Validation,
    root: &'a Value,
    searches: &[S],
    max_results: Option<usize>,
) -> Vec<SearchResponse<'a>>
where
    S: AsRef<[SearchStep]> + Sync,
{
    searches
        .par_iter()
        .map(|steps| resolver.resolve(validation, root, steps.as_ref(), max_results))
        .collect()
}

/// Resolve every address in `searches`, keeping their order
#[cfg(not(feature = "parallel"))]
pub fn resolve_all<'a, S>(
    resolver: &ValidatedSearchResolver,
    validation: &Validation,
    root: &'a Value,
    searches: &[S],
    max_results: Option<usize>,
) -> Vec<SearchResponse<'a>>
where
    S: AsRef<[SearchStep]> + Sync,
{
    searches
        .iter()
        .map(|steps| resolver.resolve(validation, root, steps.as_ref(), max_results))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::LocalNameValidator;
    use serde_json::json;

    #[test]
    fn test_resolve_all_keeps_order() {
        let pages = json!([
            { "id": "a", "content": ["first"] },
            { "id": "b", "content": ["second"] }
        ]);
        let validation = LocalNameValidator::default().validate(&pages);
        let searches = vec![
            vec![SearchStep::id("b"), SearchStep::from("content"), SearchStep::from(0)],
            vec![SearchStep::id("missing")],
            vec![SearchStep::id("a"), SearchStep::from("content"), SearchStep::from(0)],
        ];
        let responses = resolve_all(&ValidatedSearchResolver::default(), &validation, &pages, &searches, None);
        let targets: Vec<Vec<&Value>> = responses.iter().map(|response| response.targets()).collect();
        assert_eq!(targets, vec![vec![&json!("second")], vec![], vec![&json!("first")]]);
    }
}
