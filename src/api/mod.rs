pub mod care;
pub mod dashboard;
pub mod pet;
pub mod user;
