pub mod filter;
pub mod memory;
pub mod repository;
pub mod snapshot;
pub mod store;

pub use filter::ContentFilter;
pub use memory::InMemoryMovieStore;
pub use repository::MovieRepository;
pub use snapshot::Snapshot;
pub use store::MovieStore;
