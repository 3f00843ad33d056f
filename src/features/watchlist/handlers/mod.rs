mod watchlist_handler;

pub use watchlist_handler::*;
