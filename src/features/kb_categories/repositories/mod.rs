mod category_repository;
#[cfg(test)]
mod in_memory;

pub use category_repository::{CategoryRepository, PgCategoryRepository};
#[cfg(test)]
pub use in_memory::InMemoryCategoryRepository;
