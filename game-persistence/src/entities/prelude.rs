pub use super::games::Entity as Games;
pub use super::moves::Entity as Moves;
pub use super::scores::Entity as Scores;
pub use super::users::Entity as Users;
