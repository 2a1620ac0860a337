use anyhow::Result;
use chrono::{DateTime, Utc};

use newshub_core::{
    feed::{Article, HeroSelector},
    AppConfig, NewsClient,
};

use crate::display::time_ago;

pub async fn run(client: &NewsClient, config: &AppConfig) -> Result<()> {
    let articles = client.list_articles().await?;
    print_hero(&articles, config, Utc::now());
    Ok(())
}

pub fn print_hero(articles: &[Article], config: &AppConfig, now: DateTime<Utc>) {
    let hero = HeroSelector::from_config(&config.feed).select(articles, now);

    let Some(main) = hero.main else {
        println!("No articles published yet.");
        return;
    };

    println!("TRENDING");
    println!("  {} [{}]", main.headline, main.id);
    if !main.categories.is_empty() {
        let tags: Vec<String> = main
            .categories
            .iter()
            .take(3)
            .map(|c| c.to_uppercase())
            .collect();
        println!("  {}", tags.join(" | "));
    }
    println!(
        "  {} | {} | {} views",
        main.countries,
        time_ago(main.published_at(), now),
        main.views
    );

    if hero.side.is_empty() {
        return;
    }

    println!("\nLatest");
    for article in &hero.side {
        println!(
            "  {} - {} ({})",
            article.primary_category().unwrap_or("News"),
            article.headline,
            time_ago(article.published_at(), now)
        );
    }
}
