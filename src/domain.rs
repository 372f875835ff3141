pub mod calendar;
pub mod daypart;
pub mod weather;
