use std::cmp::Reverse;

use chrono::{DateTime, Duration, Utc};

use super::models::Article;
use crate::config::FeedConfig;

const DEFAULT_WINDOW_DAYS: u32 = 7;
const DEFAULT_SIDE_COUNT: usize = 3;

/// The headline article plus the secondary headlines shown next to it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroSelection<'a> {
    pub main: Option<&'a Article>,
    /// Most recent first, never contains `main`
    pub side: Vec<&'a Article>,
}

impl HeroSelection<'_> {
    pub fn is_empty(&self) -> bool {
        self.main.is_none()
    }
}

/// Picks the hero: most viewed article of the recent window (all-time if the
/// window is empty), then the latest other articles as side headlines.
#[derive(Debug, Clone, Copy)]
pub struct HeroSelector {
    window: Duration,
    side_count: usize,
}

impl Default for HeroSelector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS, DEFAULT_SIDE_COUNT)
    }
}

impl HeroSelector {
    pub fn new(window_days: u32, side_count: usize) -> Self {
        Self {
            window: Duration::days(i64::from(window_days)),
            side_count,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.hero_window_days, config.hero_side_count)
    }

    pub fn select<'a>(&self, articles: &'a [Article], now: DateTime<Utc>) -> HeroSelection<'a> {
        let dated: Vec<(&Article, Option<DateTime<Utc>>)> =
            articles.iter().map(|a| (a, a.published_at())).collect();

        // None when the window reaches past the earliest representable date
        let cutoff = now.checked_sub_signed(self.window);
        let recent = dated
            .iter()
            .filter(|(_, published)| {
                published.is_some_and(|p| cutoff.map_or(true, |cutoff| p > cutoff))
            })
            .map(|(a, _)| *a);

        let main = match most_viewed(recent) {
            Some(article) => article,
            None => {
                let Some(article) = most_viewed(articles.iter()) else {
                    return HeroSelection::default();
                };
                tracing::debug!(
                    "No articles in the last {} days, using all-time most viewed",
                    self.window.num_days()
                );
                article
            }
        };

        let mut side: Vec<(&Article, Option<DateTime<Utc>>)> = dated
            .into_iter()
            .filter(|(a, _)| a.id != main.id)
            .collect();
        side.sort_by_key(|(_, published)| (published.is_none(), Reverse(*published)));

        HeroSelection {
            main: Some(main),
            side: side
                .into_iter()
                .take(self.side_count)
                .map(|(a, _)| a)
                .collect(),
        }
    }
}

/// Hero selection with the default window (7 days) and 3 side articles
pub fn select_hero(articles: &[Article], now: DateTime<Utc>) -> HeroSelection<'_> {
    HeroSelector::default().select(articles, now)
}

// First maximal element wins so equal view counts keep input order.
fn most_viewed<'a>(pool: impl Iterator<Item = &'a Article>) -> Option<&'a Article> {
    pool.fold(None, |best, article| match best {
        Some(current) if current.views >= article.views => Some(current),
        _ => Some(article),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::testing::article;

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_empty_collection() {
        let hero = select_hero(&[], Utc::now());
        assert!(hero.is_empty());
        assert!(hero.side.is_empty());
    }

    #[test]
    fn test_recent_window_beats_views() {
        let now = Utc::now();
        let articles = vec![
            article("1", now - Duration::days(10), 100),
            article("2", now - Duration::days(2), 5),
        ];

        let hero = select_hero(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("2"));
        assert_eq!(ids(&hero.side), vec!["1"]);
    }

    #[test]
    fn test_falls_back_to_all_time() {
        let now = Utc::now();
        let articles = vec![
            article("a", now - Duration::days(30), 50),
            article("b", now - Duration::days(20), 10),
            article("c", now - Duration::days(9), 90),
        ];

        let hero = select_hero(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("c"));
        assert_eq!(ids(&hero.side), vec!["b", "a"]);
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let now = Utc::now();
        let articles = vec![
            article("edge", now - Duration::days(7), 500),
            article("inside", now - Duration::days(7) + Duration::seconds(1), 1),
        ];

        let hero = select_hero(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("inside"));
    }

    #[test]
    fn test_side_articles_exclusive_and_ordered() {
        let now = Utc::now();
        let articles = vec![
            article("1", now - Duration::days(1), 10),
            article("2", now - Duration::hours(2), 300),
            article("3", now - Duration::days(3), 20),
            article("4", now - Duration::hours(5), 30),
            article("5", now - Duration::days(20), 1000),
            article("6", now - Duration::days(2), 40),
        ];

        let hero = select_hero(&articles, now);
        let main = hero.main.unwrap();
        assert_eq!(main.id, "2");
        assert_eq!(hero.side.len(), 3);
        assert!(hero.side.iter().all(|a| a.id != main.id));
        assert_eq!(ids(&hero.side), vec!["4", "1", "6"]);

        let times: Vec<_> = hero.side.iter().map(|a| a.published_at().unwrap()).collect();
        assert!(times.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_view_ties_pick_first() {
        let now = Utc::now();
        let articles = vec![
            article("first", now - Duration::days(1), 42),
            article("second", now - Duration::hours(1), 42),
        ];

        let hero = select_hero(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("first"));
        assert_eq!(ids(&hero.side), vec!["second"]);
    }

    #[test]
    fn test_single_article() {
        let now = Utc::now();
        let articles = vec![article("only", now - Duration::days(40), 3)];

        let hero = select_hero(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("only"));
        assert!(hero.side.is_empty());
    }

    #[test]
    fn test_undated_articles() {
        let now = Utc::now();
        let mut undated = article("undated", now, 1000);
        undated.created_at = "garbage".to_string();
        let articles = vec![
            undated,
            article("recent", now - Duration::days(1), 1),
            article("old", now - Duration::days(9), 2),
        ];

        // Never part of the recency window, sorted after dated side articles
        let hero = select_hero(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("recent"));
        assert_eq!(ids(&hero.side), vec!["old", "undated"]);

        // Still eligible for the all-time fallback
        let stale = vec![articles[0].clone(), articles[2].clone()];
        let hero = select_hero(&stale, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("undated"));
    }

    #[test]
    fn test_huge_window_covers_everything() {
        let now = Utc::now();
        let mut undated = article("undated", now, 5000);
        undated.created_at = "garbage".to_string();
        let articles = vec![
            article("old", now - Duration::days(3000), 70),
            article("new", now - Duration::days(1), 20),
            undated,
        ];

        let hero = HeroSelector::new(100_000_000, 3).select(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("old"));
        assert_eq!(ids(&hero.side), vec!["new", "undated"]);
    }

    #[test]
    fn test_configured_selector() {
        let now = Utc::now();
        let articles = vec![
            article("a", now - Duration::days(10), 100),
            article("b", now - Duration::days(2), 5),
            article("c", now - Duration::days(1), 6),
        ];

        let config = FeedConfig {
            hero_window_days: 30,
            hero_side_count: 1,
            ..FeedConfig::default()
        };
        let hero = HeroSelector::from_config(&config).select(&articles, now);
        assert_eq!(hero.main.map(|a| a.id.as_str()), Some("a"));
        assert_eq!(ids(&hero.side), vec!["c"]);
    }
}
