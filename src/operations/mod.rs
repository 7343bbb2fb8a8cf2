pub mod creation;
pub mod sampling;
