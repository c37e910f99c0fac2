pub mod care;
pub mod pet;
pub mod user_app;
