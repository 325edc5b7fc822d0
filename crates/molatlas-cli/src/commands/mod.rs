pub mod density;
pub mod profile;
