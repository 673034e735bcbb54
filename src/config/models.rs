use std::path::Path;

use clap::Parser;
use log::debug;

use crate::error::{Error, Result};

pub const BASE_URL_ENV: &str = "BASE_URL";
pub const ACCESS_SALT_ENV: &str = "ACCESS_SALT";
pub const ENV_FILE: &str = ".env";

/// Load `path` into the process environment if it exists. Variables that are
/// already set keep their value.
pub fn load_env_file<P: AsRef<Path>>(path: P) -> bool {
    match dotenvy::from_path(path.as_ref()) {
        Ok(()) => true,
        Err(e) => {
            debug!("No env file loaded from {}: {}", path.as_ref().display(), e);
            false
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Register once, then keep a DNS record pointed at this host")]
pub struct Cli {
    /// API base address, e.g. "https://ddns.example.com"
    #[arg(long = "baseUrl", value_name = "URL")]
    pub base_url: Option<String>,

    /// Credential sent in the AccessSalt header on registration
    #[arg(long = "accessSalt", value_name = "SALT")]
    pub access_salt: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub access_salt: String,
}

impl Settings {
    /// Flags win over environment; empty values count as unset.
    pub fn resolve<F>(cli: &Cli, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = first_non_empty([cli.base_url.clone(), env(BASE_URL_ENV)])
            .ok_or(Error::MissingBaseUrl)?;
        let access_salt =
            first_non_empty([cli.access_salt.clone(), env(ACCESS_SALT_ENV)]).unwrap_or_default();

        Ok(Self {
            base_url,
            access_salt,
        })
    }
}

fn first_non_empty<I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    values.into_iter().flatten().find(|v| !v.is_empty())
}
