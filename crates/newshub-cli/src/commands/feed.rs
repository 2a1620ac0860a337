use anyhow::Result;
use chrono::Utc;

use newshub_core::{
    feed::{filter_and_sort, Article, DateRange, Selection, SortOption},
    AppConfig, NewsClient,
};

use crate::display::print_card;
use crate::FeedArgs;

pub async fn run(client: &NewsClient, config: &AppConfig, args: &FeedArgs) -> Result<()> {
    let articles = client.list_articles().await?;
    print_feed(&articles, &selection(args, config));
    Ok(())
}

/// Hero block followed by the unfiltered feed
pub async fn home(client: &NewsClient, config: &AppConfig) -> Result<()> {
    let articles = client.list_articles().await?;

    super::hero::print_hero(&articles, config, Utc::now());
    println!();
    print_feed(&articles, &selection(&FeedArgs::default(), config));

    Ok(())
}

fn selection(args: &FeedArgs, config: &AppConfig) -> Selection {
    let sort = match &args.sort {
        Some(label) => {
            let sort = SortOption::from_label(label);
            if sort.is_none() {
                tracing::warn!("Unknown sort '{}', keeping API order", label);
            }
            sort
        }
        None => config.feed.sort_option(),
    };

    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            tracing::warn!("--from {} is after --to {}, nothing can match", from, to);
        }
    }

    Selection::default()
        .with_category(args.category.clone().into())
        .with_country(args.country.clone().into())
        .with_dates(DateRange::new(args.from, args.to))
        .with_sort(sort)
}

fn print_feed(articles: &[Article], selection: &Selection) {
    let filtered = filter_and_sort(articles, selection);

    println!("Browse Feed ({} articles found)\n", filtered.len());

    if filtered.is_empty() {
        println!("No articles match your filters.");
        println!("\nRun without --category, --country, --from or --to to clear them.");
        return;
    }

    for article in filtered {
        print_card(article);
    }
}
