use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
async fn new_application_lands_in_the_admin_inbox() {
    let app = TestApp::spawn().await;

    let admin = app.register_user("Admin", "admin@test.com", "Password123!").await;
    let applicant = app.register_user("Doc", "doc@test.com", "Password123!").await;

    // Admin starts with an empty inbox
    let inbox: Value = app
        .auth_get("/api/user/notification", &admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["unseen"].as_array().unwrap().len(), 0);

    let doctor_id = app.apply_doctor(&applicant, "Grace", "Hopper").await;

    let inbox: Value = app
        .auth_get("/api/user/notification", &admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let unseen = inbox["unseen"].as_array().unwrap();
    assert_eq!(unseen.len(), 1);
    assert_eq!(unseen[0]["notification_type"], "new-doctor-request");
    assert_eq!(unseen[0]["data"]["doctorId"], doctor_id);
    assert_eq!(unseen[0]["data"]["name"], "Grace Hopper");
    assert_eq!(unseen[0]["on_click_path"], "/admin/doctorslist");
}

#[tokio::test]
async fn mark_all_seen_moves_everything_and_is_idempotent() {
    let app = TestApp::spawn().await;

    let admin = app.register_user("Admin", "admin@test.com", "Password123!").await;
    for i in 0..3 {
        let applicant = app
            .register_user(&format!("Doc {i}"), &format!("doc{i}@test.com"), "Password123!")
            .await;
        app.apply_doctor(&applicant, "Doc", &format!("Number{i}")).await;
    }

    let inbox: Value = app
        .auth_put("/api/user/notification/seen", &admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["unseen"].as_array().unwrap().len(), 0);
    let seen = inbox["seen"].as_array().unwrap();
    assert_eq!(seen.len(), 3);
    // Original order preserved
    assert_eq!(seen[0]["data"]["name"], "Doc Number0");
    assert_eq!(seen[1]["data"]["name"], "Doc Number1");
    assert_eq!(seen[2]["data"]["name"], "Doc Number2");

    // Marking again duplicates nothing
    let inbox: Value = app
        .auth_put("/api/user/notification/seen", &admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["unseen"].as_array().unwrap().len(), 0);
    assert_eq!(inbox["seen"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn clear_wipes_both_sequences_for_good() {
    let app = TestApp::spawn().await;

    let admin = app.register_user("Admin", "admin@test.com", "Password123!").await;
    let applicant = app.register_user("Doc", "doc@test.com", "Password123!").await;
    app.apply_doctor(&applicant, "A", "B").await;

    // Split the history across both sequences: one seen, one unseen
    app.auth_put("/api/user/notification/seen", &admin.access_token)
        .send()
        .await
        .unwrap();
    let applicant2 = app.register_user("Doc 2", "doc2@test.com", "Password123!").await;
    app.apply_doctor(&applicant2, "C", "D").await;

    let inbox: Value = app
        .auth_delete("/api/user/notification", &admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["unseen"].as_array().unwrap().len(), 0);
    assert_eq!(inbox["seen"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn push_after_clear_leaves_exactly_one_unseen() {
    let app = TestApp::spawn().await;

    let admin = app.register_user("Admin", "admin@test.com", "Password123!").await;
    let applicant = app.register_user("Doc", "doc@test.com", "Password123!").await;
    app.apply_doctor(&applicant, "A", "B").await;

    app.auth_delete("/api/user/notification", &admin.access_token)
        .send()
        .await
        .unwrap();

    // A fresh event after the wipe
    let applicant2 = app.register_user("Doc 2", "doc2@test.com", "Password123!").await;
    app.apply_doctor(&applicant2, "C", "D").await;

    let inbox: Value = app
        .auth_get("/api/user/notification", &admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["unseen"].as_array().unwrap().len(), 1);
    assert_eq!(inbox["seen"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unseen_sequence_keeps_only_the_newest_hundred() {
    use bson::oid::ObjectId;
    use mediq_db::models::{Notification, NotificationType};
    use mediq_services::dao::user::UserDao;

    let app = TestApp::spawn().await;

    let user = app.register_user("Flooded", "flooded@test.com", "Password123!").await;
    let user_id = ObjectId::parse_str(&user.id).unwrap();

    let users = UserDao::new(&app.db);
    for i in 1..=101 {
        users
            .push_notification(
                user_id,
                Notification {
                    notification_type: NotificationType::NewAppointmentRequest,
                    message: format!("event {i}"),
                    on_click_path: "/doctor/appointments".to_string(),
                    data: None,
                    created_at: bson::DateTime::now(),
                },
            )
            .await
            .unwrap();
    }

    let inbox: Value = app
        .auth_get("/api/user/notification", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let unseen = inbox["unseen"].as_array().unwrap();
    // The oldest event falls off the front; the newest hundred remain
    // in arrival order.
    assert_eq!(unseen.len(), 100);
    assert_eq!(unseen[0]["message"], "event 2");
    assert_eq!(unseen[99]["message"], "event 101");
}

#[tokio::test]
async fn push_then_mark_then_clear_ends_empty() {
    let app = TestApp::spawn().await;

    let admin = app.register_user("Admin", "admin@test.com", "Password123!").await;
    for i in 0..4 {
        let applicant = app
            .register_user(&format!("Doc {i}"), &format!("doc{i}@test.com"), "Password123!")
            .await;
        app.apply_doctor(&applicant, "Doc", &format!("N{i}")).await;
    }

    app.auth_put("/api/user/notification/seen", &admin.access_token)
        .send()
        .await
        .unwrap();

    let inbox: Value = app
        .auth_delete("/api/user/notification", &admin.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox["unseen"].as_array().unwrap().len(), 0);
    assert_eq!(inbox["seen"].as_array().unwrap().len(), 0);
}
