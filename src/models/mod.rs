pub mod location;
pub mod resources;

pub use location::{GeocodedLocation, Location};
pub use resources::{Event, Movie, Review, Trail, Weather};
