pub use super::events::Entity as Events;
pub use super::locations::Entity as Locations;
pub use super::movies::Entity as Movies;
pub use super::reviews::Entity as Reviews;
pub use super::trails::Entity as Trails;
pub use super::weather_reports::Entity as WeatherReports;
