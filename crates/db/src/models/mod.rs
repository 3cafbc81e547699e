pub mod appointment;
pub mod doctor;
pub mod notification;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use doctor::{Doctor, DoctorStatus};
pub use notification::{Notification, NotificationType};
pub use user::User;
