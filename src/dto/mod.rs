pub mod auth;
pub mod cart;
pub mod categories;
pub mod contacts;
pub mod notifications;
pub mod orders;
pub mod products;
