mod run;

use serde_json::{json, Value};

use crate::api::models::SessionState;

// Registration body as the service returns it.
pub fn registration_body(token: &str) -> Value {
    json!({
        "data": {
            "token": token,
            "recordInfo": {
                "id": "rec-7f3a",
                "domainId": "dom-0012",
                "domainName": "example.com",
                "line": "default",
                "recordName": "home",
                "recordType": "A",
                "recordContent": "203.0.113.24",
                "status": "ENABLE",
                "locked": false,
                "proxied": true,
                "ttl": 600,
                "weight": 1,
                "settings": "{\"flatten\":false}",
                "meta": "{}",
                "comment": "home router",
                "tags": ["home", "ddns"],
                "createTime": "2024-05-01T02:00:00Z",
                "updateTime": "2024-05-02T11:30:15.1234+08:00",
                "dnsFrom": "cloudflare"
            }
        }
    })
}

pub fn session_state(token: &str) -> SessionState {
    serde_json::from_value(registration_body(token)).unwrap()
}
