pub mod auth;
pub mod kb_categories;
