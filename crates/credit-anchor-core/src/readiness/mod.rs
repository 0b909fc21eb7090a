pub mod profile;
pub mod scorer;
