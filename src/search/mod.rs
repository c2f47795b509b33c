pub mod render;
pub mod request;
pub mod session;
pub mod strategy;
