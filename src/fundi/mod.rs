//! Fundi (service provider) profile payloads.

mod dto;
mod fields;

pub use dto::{CreateFundiDto, Partial, UpdateFundiDto};
pub use fields::{Email, FundiName, ImageUrl, LocationName, PhoneNumber, Skills, YearsOfExperience};
