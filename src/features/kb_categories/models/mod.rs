mod category;

pub use category::{Category, CategoryFields, CategoryFilter, CategoryOrder};
