pub mod appointment;
pub mod base;
pub mod doctor;
pub mod user;

pub use base::BaseDao;
