mod facets;
mod filter;
mod hero;
mod models;

pub use facets::{derive_facets, Facets};
pub use filter::filter_and_sort;
pub use hero::{select_hero, HeroSelection, HeroSelector};
pub use models::*;
