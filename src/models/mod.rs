pub mod calculator;
pub mod enquiry;
pub mod hotel;
pub mod room;
pub mod season;
