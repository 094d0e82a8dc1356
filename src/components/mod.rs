pub mod backdrop;
pub mod particle_field;
pub mod responsive;
