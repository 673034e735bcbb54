use serde::{Deserialize, Serialize};

// Snapshot of the record as the service reported it at registration time.
// Written to disk verbatim, never modified locally. Timestamps and tags are
// kept exactly as received, null included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DnsRecord {
    pub id: String,
    pub domain_id: String,
    pub domain_name: String,
    pub line: String,
    pub record_name: String,
    pub record_type: String,
    pub record_content: String,
    pub status: String,
    pub locked: bool,
    pub proxied: bool,
    pub ttl: i64,
    pub weight: i32,
    pub settings: String,
    pub meta: String,
    pub comment: String,
    pub tags: Option<Vec<String>>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
    pub dns_from: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub token: String,
    pub record_info: DnsRecord,
}

/// Registration response body, persisted as-is to the state file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub data: SessionData,
}

impl SessionState {
    pub fn token(&self) -> &str {
        &self.data.token
    }

    pub fn record(&self) -> &DnsRecord {
        &self.data.record_info
    }
}
