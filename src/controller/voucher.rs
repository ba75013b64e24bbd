//! # Hotspot Vouchers
//!
//! Thin wrappers over [`Client::execute`] for the voucher commands.
//!
//! ```text
//! create_voucher ──► POST /api/s/{site}/cmd/hotspot  {cmd: "create-voucher", ...}
//!                    ◄── data: [{ create_time }]
//! stat_voucher   ──► POST /api/s/{site}/stat/voucher {create_time}
//!                    ◄── data: [{ code, duration, quota, ... }]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use super::client::Client;
use super::envelope::decode_records;
use super::request::ApiRequest;
use crate::error::{FichaError, Result};

/// A voucher record as returned by `stat/voucher`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub code: String,
    /// Unix seconds; doubles as the handle for looking a new batch up again.
    pub create_time: i64,
    /// Validity in minutes once redeemed.
    #[serde(default)]
    pub duration: u64,
    /// Number of allowed uses (0 = unlimited).
    #[serde(default)]
    pub quota: u32,
    #[serde(default)]
    pub used: u32,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub qos_rate_max_up: Option<u64>,
    #[serde(default)]
    pub qos_rate_max_down: Option<u64>,
    #[serde(default)]
    pub qos_usage_quota: Option<u64>,
}

/// Parameters for a `create-voucher` command.
///
/// ## Example
///
/// ```
/// use ficha::controller::VoucherSpec;
///
/// let spec = VoucherSpec::new(24 * 60).quota(1).note("room 12");
/// assert_eq!(spec.minutes, 1440);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherSpec {
    pub minutes: u64,
    pub count: u32,
    pub quota: u32,
    pub note: Option<String>,
    pub up_kbps: Option<u64>,
    pub down_kbps: Option<u64>,
    pub megabytes: Option<u64>,
}

impl VoucherSpec {
    /// One single-use voucher valid for `minutes`.
    pub fn new(minutes: u64) -> Self {
        Self {
            minutes,
            count: 1,
            quota: 1,
            note: None,
            up_kbps: None,
            down_kbps: None,
            megabytes: None,
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn quota(mut self, quota: u32) -> Self {
        self.quota = quota;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }

    pub fn up_kbps(mut self, kbps: u64) -> Self {
        self.up_kbps = Some(kbps);
        self
    }

    pub fn down_kbps(mut self, kbps: u64) -> Self {
        self.down_kbps = Some(kbps);
        self
    }

    pub fn megabytes(mut self, mb: u64) -> Self {
        self.megabytes = Some(mb);
        self
    }

    /// The `cmd/hotspot` payload for this spec.
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("cmd".into(), json!("create-voucher"));
        payload.insert("expire".into(), json!(self.minutes));
        payload.insert("n".into(), json!(self.count));
        payload.insert("quota".into(), json!(self.quota));
        if let Some(note) = &self.note {
            payload.insert("note".into(), json!(note.trim()));
        }
        if let Some(up) = self.up_kbps {
            payload.insert("up".into(), json!(up));
        }
        if let Some(down) = self.down_kbps {
            payload.insert("down".into(), json!(down));
        }
        if let Some(mb) = self.megabytes {
            payload.insert("bytes".into(), json!(mb));
        }
        Value::Object(payload)
    }
}

#[derive(Deserialize)]
struct Created {
    create_time: i64,
}

impl Client {
    /// Create vouchers and return the batch's `create_time`.
    pub async fn create_voucher(&mut self, spec: &VoucherSpec) -> Result<i64> {
        if spec.minutes == 0 {
            return Err(FichaError::Config("voucher duration must be positive".into()));
        }

        let request = ApiRequest::new(self.site_path("cmd/hotspot")).payload(spec.to_payload());
        let data = self.execute(&request).await?;

        let created: Vec<Created> = decode_records(data)?;
        let create_time = created
            .first()
            .map(|c| c.create_time)
            .ok_or_else(|| FichaError::EmptyResult("create-voucher returned no batch".into()))?;

        info!(
            create_time,
            minutes = spec.minutes,
            count = spec.count,
            "created voucher batch"
        );
        Ok(create_time)
    }

    /// Look up vouchers, either one batch by `create_time` or all of them.
    pub async fn stat_voucher(&mut self, create_time: Option<i64>) -> Result<Vec<Voucher>> {
        let mut request = ApiRequest::new(self.site_path("stat/voucher"));
        if let Some(create_time) = create_time {
            request = request.payload(json!({ "create_time": create_time }));
        }
        decode_records(self.execute(&request).await?)
    }

    /// Revoke (delete) a voucher by its `_id`.
    pub async fn revoke_voucher(&mut self, voucher_id: &str) -> Result<()> {
        let request = ApiRequest::new(self.site_path("cmd/hotspot"))
            .payload(json!({ "cmd": "delete-voucher", "_id": voucher_id }));
        self.execute(&request).await?;
        info!(voucher_id, "revoked voucher");
        Ok(())
    }
}
