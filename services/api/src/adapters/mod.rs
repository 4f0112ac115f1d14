pub mod category_source;
pub mod detail_cache;
pub mod doc_store;
pub mod rakuten;

pub use category_source::{FileCategorySource, HttpCategorySource};
pub use detail_cache::MemoryDetailCache;
pub use doc_store::PgDocumentStore;
pub use rakuten::RakutenRecipeApi;
