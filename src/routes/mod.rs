pub mod enquiry;
pub mod health;
pub mod hotel;
pub mod quote;
pub mod room;
pub mod season;
