pub mod drop;
pub mod session;
pub mod view;
