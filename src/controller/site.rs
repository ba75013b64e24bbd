//! Site-level lookups.

use serde::Deserialize;

use super::client::Client;
use super::envelope::decode_records;
use super::request::ApiRequest;
use crate::error::{FichaError, Result};

/// A site the logged-in admin can manage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Site {
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Short name used in `/api/s/{name}/...` paths
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// Controller build information from `stat/sysinfo`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Client {
    /// Sites visible to the current admin.
    pub async fn list_sites(&mut self) -> Result<Vec<Site>> {
        decode_records(self.execute(&ApiRequest::new("/api/self/sites")).await?)
    }

    /// Controller version and host details for the configured site.
    pub async fn stat_sysinfo(&mut self) -> Result<SysInfo> {
        let request = ApiRequest::new(self.site_path("stat/sysinfo"));
        let infos: Vec<SysInfo> = decode_records(self.execute(&request).await?)?;
        infos
            .into_iter()
            .next()
            .ok_or_else(|| FichaError::EmptyResult("stat/sysinfo returned nothing".into()))
    }
}
