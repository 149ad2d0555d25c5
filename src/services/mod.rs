pub mod intake;
pub mod listing;
pub mod notify;
