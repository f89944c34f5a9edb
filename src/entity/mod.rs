pub mod admins;
pub mod categories;
pub mod contacts;
pub mod counters;
pub mod orders;
pub mod products;
pub mod settings;
pub mod users;

pub use admins::Entity as Admins;
pub use categories::Entity as Categories;
pub use contacts::Entity as Contacts;
pub use counters::Entity as Counters;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use settings::Entity as Settings;
pub use users::Entity as Users;
