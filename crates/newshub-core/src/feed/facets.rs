use std::collections::BTreeSet;

use super::models::Article;

/// Filterable dimensions present in a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.countries.is_empty()
    }
}

/// Collect every distinct category and country label in `articles`
pub fn derive_facets(articles: &[Article]) -> Facets {
    let mut facets = Facets::default();

    for article in articles {
        facets.categories.extend(article.categories.iter().cloned());
        facets.countries.insert(article.countries.clone());
    }

    tracing::debug!(
        categories = facets.categories.len(),
        countries = facets.countries.len(),
        "Derived facets from {} articles",
        articles.len()
    );

    facets
}
