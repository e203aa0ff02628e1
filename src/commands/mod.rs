pub mod doctor;
pub mod download;
pub mod interactive;
