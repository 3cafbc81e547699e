use serde_json::Value;

use super::test_app::TestApp;

pub struct SeededUser {
    pub id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    pub is_admin: bool,
}

impl TestApp {
    /// Register a user and return their auth info. The first registered
    /// account in a fresh database is the administrator.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> SeededUser {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Register failed");
        assert_eq!(resp.status().as_u16(), 201, "register should succeed");

        let json: Value = resp.json().await.unwrap();
        SeededUser {
            id: json["user"]["id"].as_str().unwrap().to_string(),
            email: email.to_string(),
            access_token: json["access_token"].as_str().unwrap().to_string(),
            refresh_token: json["refresh_token"].as_str().unwrap().to_string(),
            is_admin: json["user"]["is_admin"].as_bool().unwrap_or(false),
        }
    }

    /// File a doctor application for `user` and return the profile id.
    pub async fn apply_doctor(&self, user: &SeededUser, first_name: &str, last_name: &str) -> String {
        let resp = self
            .auth_post("/api/doctor/apply", &user.access_token)
            .json(&doctor_profile_body(first_name, last_name))
            .send()
            .await
            .expect("Apply failed");
        assert_eq!(resp.status().as_u16(), 201, "apply should succeed");

        let json: Value = resp.json().await.unwrap();
        json["id"].as_str().unwrap().to_string()
    }

    pub async fn approve_doctor(&self, admin: &SeededUser, doctor_id: &str) {
        let resp = self
            .auth_put(&format!("/api/admin/doctor/{doctor_id}/status"), &admin.access_token)
            .json(&serde_json::json!({ "status": "approved" }))
            .send()
            .await
            .expect("Approve failed");
        assert_eq!(resp.status().as_u16(), 200, "approve should succeed");
    }

    pub fn auth_get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_post(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_put(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }
}

pub fn doctor_profile_body(first_name: &str, last_name: &str) -> Value {
    serde_json::json!({
        "first_name": first_name,
        "last_name": last_name,
        "phone_number": "555-0100",
        "website": null,
        "address": "1 Clinic Way",
        "specialization": "Dermatology",
        "experience": "10 years",
        "fee_per_consultation": 120.0,
        "timings": ["09:00", "17:00"],
    })
}
