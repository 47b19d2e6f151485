pub mod games;
pub mod moves;
pub mod prelude;
pub mod scores;
pub mod users;
