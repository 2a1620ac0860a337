pub mod admin;
pub mod auth;
pub mod facets;
pub mod feed;
pub mod hero;
pub mod show;
