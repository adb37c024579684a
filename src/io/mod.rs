/// CSV export of power curves.
pub mod export;
