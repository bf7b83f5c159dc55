pub mod explore;

pub use explore::ExploreService;
