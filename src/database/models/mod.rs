pub mod appointment;
pub mod care;
pub mod pet;
pub mod user;

pub use appointment::Appointment;
pub use care::{FeedingRecord, HealthQuestion, VaccineRecord};
pub use pet::{Pet, PetSummary, Permission};
pub use user::User;
