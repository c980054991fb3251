pub mod datetime;
pub mod net;
