pub mod api;
pub mod config;
pub mod error;
pub mod feed;

pub use api::{NewsClient, NewsSource, Session, SessionStore, ViewLatch};
pub use config::AppConfig;
pub use error::{Error, Result};
