pub mod status;
pub mod ticket;
