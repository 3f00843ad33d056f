mod watchlist_dto;

pub use watchlist_dto::{
    AddWatchlistDto, OrdersQuery, WatchlistCheckDto, WatchlistEntryDto, WatchlistItemQuery,
};
