mod follow_test;
mod http_test;
mod mark_test;
mod recipe_test;
mod shopping_list_test;
mod user_test;
