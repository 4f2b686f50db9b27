pub mod description;
pub mod destination;
pub mod resource;
mod timestamp;
