pub mod follow;
pub mod ingredient;
pub mod mark;
pub mod recipe;
pub mod shopping_list;
pub mod tag;
pub mod token;
pub mod user;
