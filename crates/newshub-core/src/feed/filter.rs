use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use super::models::{Article, Selection, SortOption};

/// Reduce `articles` to those passing every active filter in `selection`,
/// ordered by its sort option.
///
/// Sorting is stable, so ties keep their input order. Articles whose
/// `created_at` cannot be parsed fail any active date bound and sort after
/// all dated articles.
pub fn filter_and_sort<'a>(articles: &'a [Article], selection: &Selection) -> Vec<&'a Article> {
    let mut rows: Vec<(&Article, Option<DateTime<Utc>>)> = articles
        .iter()
        .filter(|a| selection.category.matches_any(&a.categories))
        .filter(|a| selection.country.matches(&a.countries))
        .map(|a| (a, a.published_at()))
        .filter(|(_, published)| selection.dates.contains(*published))
        .collect();

    match selection.sort {
        Some(SortOption::Newest) => {
            rows.sort_by_key(|(_, published)| (published.is_none(), Reverse(*published)))
        }
        Some(SortOption::Oldest) => {
            rows.sort_by_key(|(_, published)| (published.is_none(), *published))
        }
        Some(SortOption::Popular) => rows.sort_by_key(|(a, _)| Reverse(a.views)),
        None => {}
    }

    tracing::debug!(
        "Filtered {} articles down to {} (sort: {})",
        articles.len(),
        rows.len(),
        selection.sort.map_or("input order", |s| s.as_str())
    );

    rows.into_iter().map(|(a, _)| a).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::models::{Choice, DateRange};
    use crate::feed::testing::{article, ArticleExt};
    use chrono::{Duration, NaiveDate, TimeZone};

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    fn sample() -> Vec<Article> {
        let base = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        vec![
            article("1", base - Duration::days(4), 30).categories(&["Health"]).country("Kenya"),
            article("2", base - Duration::days(1), 5).categories(&["Science"]).country("Peru"),
            article("3", base - Duration::days(3), 80)
                .categories(&["Science", "Health"])
                .country("Kenya"),
            article("4", base, 12).categories(&["Culture"]).country("Japan"),
            article("5", base - Duration::days(2), 40).categories(&["Tech"]).country("Peru"),
        ]
    }

    #[test]
    fn test_category_popular() {
        let articles = sample();
        let selection = Selection::default()
            .with_category(Choice::only("Health"))
            .with_sort(Some(SortOption::Popular));

        let result = filter_and_sort(&articles, &selection);
        assert_eq!(ids(&result), vec!["3", "1"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let articles = sample();
        let selection = Selection::default()
            .with_category(Choice::only("Science"))
            .with_country(Choice::only("Kenya"));

        let result = filter_and_sort(&articles, &selection);
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_unknown_label_yields_empty() {
        let articles = sample();
        let selection = Selection::default().with_country(Choice::only("Atlantis"));
        assert!(filter_and_sort(&articles, &selection).is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let articles = sample();

        let newest = filter_and_sort(&articles, &Selection::default());
        assert_eq!(ids(&newest), vec!["4", "2", "5", "3", "1"]);

        let oldest = filter_and_sort(
            &articles,
            &Selection::default().with_sort(Some(SortOption::Oldest)),
        );
        assert_eq!(ids(&oldest), vec!["1", "3", "5", "2", "4"]);

        let unsorted = filter_and_sort(&articles, &Selection::default().with_sort(None));
        assert_eq!(ids(&unsorted), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_popular_ties_keep_input_order() {
        let now = Utc::now();
        let articles = vec![
            article("a", now, 10),
            article("b", now, 20),
            article("c", now, 10),
            article("d", now, 20),
        ];
        let selection = Selection::default().with_sort(Some(SortOption::Popular));
        assert_eq!(ids(&filter_and_sort(&articles, &selection)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_single_day_range() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let midnight = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
        let articles = vec![
            article("before", midnight - Duration::milliseconds(1), 0),
            article("start", midnight, 0),
            article("late", midnight + Duration::hours(23) + Duration::minutes(59), 0),
            article("after", midnight + Duration::days(1), 0),
        ];

        let selection = Selection::default()
            .with_dates(DateRange::new(Some(day), Some(day)))
            .with_sort(None);
        assert_eq!(ids(&filter_and_sort(&articles, &selection)), vec!["start", "late"]);
    }

    #[test]
    fn test_open_ended_ranges() {
        let articles = sample();
        let from = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
        let selection = Selection::default()
            .with_dates(DateRange::new(Some(from), None))
            .with_sort(Some(SortOption::Oldest));
        assert_eq!(ids(&filter_and_sort(&articles, &selection)), vec!["5", "2", "4"]);

        let to = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        let selection = Selection::default()
            .with_dates(DateRange::new(None, Some(to)))
            .with_sort(Some(SortOption::Oldest));
        assert_eq!(ids(&filter_and_sort(&articles, &selection)), vec!["1", "3"]);
    }

    #[test]
    fn test_unparsable_timestamps() {
        let now = Utc::now();
        let mut broken = article("broken", now, 99);
        broken.created_at = "not a date".to_string();
        let articles = vec![broken, article("ok", now - Duration::days(1), 1)];

        let newest = filter_and_sort(&articles, &Selection::default());
        assert_eq!(ids(&newest), vec!["ok", "broken"]);

        let oldest = filter_and_sort(
            &articles,
            &Selection::default().with_sort(Some(SortOption::Oldest)),
        );
        assert_eq!(ids(&oldest), vec!["ok", "broken"]);

        let today = now.date_naive();
        let ranged = filter_and_sort(
            &articles,
            &Selection::default().with_dates(DateRange::new(None, Some(today))),
        );
        assert_eq!(ids(&ranged), vec!["ok"]);
    }

    #[test]
    fn test_deterministic_subset() {
        let articles = sample();
        let selection = Selection::default()
            .with_country(Choice::only("Peru"))
            .with_sort(Some(SortOption::Popular));

        let first = filter_and_sort(&articles, &selection);
        let second = filter_and_sort(&articles, &selection);
        assert_eq!(first, second);
        assert!(first
            .iter()
            .all(|a| articles.iter().any(|orig| orig.id == a.id)));
    }

    #[test]
    fn test_empty_collection() {
        assert!(filter_and_sort(&[], &Selection::default()).is_empty());
    }
}
