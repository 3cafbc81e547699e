use mediq_config::Settings;
use mediq_services::{
    ApprovalService, AuthService, BookingService,
    dao::{appointment::AppointmentDao, doctor::DoctorDao, user::UserDao},
};
use mongodb::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserDao>,
    pub doctors: Arc<DoctorDao>,
    pub appointments: Arc<AppointmentDao>,
    pub booking: Arc<BookingService>,
    pub approval: Arc<ApprovalService>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let users = Arc::new(UserDao::new(&db));
        let doctors = Arc::new(DoctorDao::new(&db));
        let appointments = Arc::new(AppointmentDao::new(&db));
        let booking = Arc::new(BookingService::new(
            appointments.clone(),
            doctors.clone(),
            users.clone(),
        ));
        let approval = Arc::new(ApprovalService::new(doctors.clone(), users.clone()));

        Self {
            db,
            settings,
            auth,
            users,
            doctors,
            appointments,
            booking,
            approval,
        }
    }
}
