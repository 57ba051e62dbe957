pub mod fortune;
pub mod user;
