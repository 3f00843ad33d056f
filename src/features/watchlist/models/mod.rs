mod watchlist_entry;

pub use watchlist_entry::WatchlistEntry;
