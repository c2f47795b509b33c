pub mod channels;
pub mod client;
pub mod search;
