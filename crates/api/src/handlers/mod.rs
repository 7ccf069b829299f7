pub mod employees;
pub mod games;
pub mod items;
pub mod likes;
pub mod purchases;
pub mod rating;
