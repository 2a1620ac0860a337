use chrono::{DateTime, Utc};

use newshub_core::feed::Article;

/// "3 days ago" style distance
pub fn time_ago(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(published) = published else {
        return "unknown date".to_string();
    };

    let elapsed = now.signed_duration_since(published);
    if elapsed.num_seconds() < 60 {
        return "just now".to_string();
    }

    let (amount, unit) = if elapsed.num_days() >= 365 {
        (elapsed.num_days() / 365, "year")
    } else if elapsed.num_days() >= 30 {
        (elapsed.num_days() / 30, "month")
    } else if elapsed.num_days() >= 1 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() >= 1 {
        (elapsed.num_hours(), "hour")
    } else {
        (elapsed.num_minutes(), "minute")
    };

    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

/// Publication date for listings
pub fn short_date(article: &Article) -> String {
    article
        .published_at()
        .map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| article.created_at.clone())
}

/// One feed entry, two lines
pub fn print_card(article: &Article) {
    println!("  {} [{}]", article.headline, article.id);

    let category = article.primary_category().unwrap_or("Uncategorized");
    println!(
        "    {} | {} | {} | {} views",
        category,
        article.countries,
        short_date(article),
        article.views
    );
}
