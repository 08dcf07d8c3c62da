mod genres;
mod menu;
mod output;
mod search;
mod setup;
mod stats;

pub use genres::cmd_genres;
pub use menu::{Menu, cmd_menu};
pub use output::{describe_signature, truncate_text};
pub use search::{cmd_search_genre, cmd_search_title};
pub use setup::{cmd_bootstrap_catalog, cmd_init};
pub use stats::{cmd_popular, cmd_recent};
