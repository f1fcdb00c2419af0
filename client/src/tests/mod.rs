pub mod composite;

// Common test setup: every test talks to its own mock Supabase
// project and asserts on the requests the client actually sent.
use serde_json::json;
use wiremock::MockServer;

use crate::Supabase;

pub const TEST_ANON_KEY: &str = "test-anon-key";

pub struct TestContext {
    pub server: MockServer,
    pub supabase: Supabase,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let supabase = Supabase::new(server.uri(), TEST_ANON_KEY);
        Self { server, supabase }
    }

    /// Requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .expect("request recording is enabled")
    }
}

pub fn ana_row() -> serde_json::Value {
    json!({
        "id": "11111111-1111-4111-8111-111111111111",
        "name": "Ana",
        "image_url": "https://cdn.example/ana.png",
        "last_contact_date": "2024-01-01",
        "created_at": "2024-01-05T10:00:00+00:00"
    })
}

pub fn bo_row() -> serde_json::Value {
    json!({
        "id": "22222222-2222-4222-8222-222222222222",
        "name": "Bo",
        "image_url": "https://cdn.example/bo.png",
        "last_contact_date": "2023-06-01",
        "created_at": "2024-01-06T10:00:00+00:00"
    })
}
