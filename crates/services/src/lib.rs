pub mod approval;
pub mod auth;
pub mod booking;
pub mod dao;

pub use approval::ApprovalService;
pub use auth::AuthService;
pub use booking::BookingService;
pub use dao::*;
