use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use client::KasetFairClient;
use directories::BaseDirs;
use reqwest::{
    Client,
    cookie::{CookieStore, Jar},
};
use shared::config::client::ClientConfig;
use tracing::{debug, warn};
use url::Url;

/// Session cookies are issued by the web sign-in; the CLI only stores them.
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Store a `Cookie` header copied from a signed-in browser
    Import {
        /// Cookie header value, e.g. `session=abc; csrf=def`
        cookie: String,
    },
    /// Remove the stored session cookies
    Clear,
}

pub fn run(config: &ClientConfig, action: SessionCommand) -> Result<()> {
    match action {
        SessionCommand::Import { cookie } => import(config, &cookie),
        SessionCommand::Clear => clear(config),
    }
}

fn import(config: &ClientConfig, cookie_header: &str) -> Result<()> {
    let origin = &config.api_base_url;
    let jar_path = session_path(config);
    let jar = Arc::new(Jar::default());
    add_cookies(&jar, cookie_header, origin);

    if jar.cookies(origin).is_none() {
        bail!("no cookies found in the provided header");
    }
    persist_cookie_jar(&jar, origin, &jar_path)?;
    println!("Session cookies saved to {}", jar_path.display());
    Ok(())
}

fn clear(config: &ClientConfig) -> Result<()> {
    let jar_path = session_path(config);
    if jar_path.exists() {
        fs::remove_file(&jar_path)
            .with_context(|| format!("failed to remove session jar {}", jar_path.display()))?;
        println!("Removed session cookies at {}", jar_path.display());
    } else {
        println!("No session cookies found at {}", jar_path.display());
    }
    Ok(())
}

/// An API client carrying the stored cookies, saved back after each command
/// so refreshed cookies survive.
pub struct Session {
    api: KasetFairClient,
    jar: Arc<Jar>,
    origin: Url,
    jar_path: PathBuf,
}

impl Session {
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let origin = config.api_base_url.clone();
        let jar_path = session_path(config);
        let jar = if jar_path.exists() {
            load_cookie_jar(&origin, &jar_path)?
        } else {
            warn!(
                path = %jar_path.display(),
                "no session cookies found; run `kasetfair session import` first"
            );
            Arc::new(Jar::default())
        };
        let http = build_client(jar.clone())?;

        Ok(Self {
            api: KasetFairClient::from_config(config, http),
            jar,
            origin,
            jar_path,
        })
    }

    pub fn api(&self) -> KasetFairClient {
        self.api.clone()
    }

    pub fn save(&self) -> Result<()> {
        if self.jar.cookies(&self.origin).is_none() {
            return Ok(());
        }
        persist_cookie_jar(&self.jar, &self.origin, &self.jar_path)?;
        debug!(path = %self.jar_path.display(), "session cookies saved");
        Ok(())
    }
}

pub fn session_path(config: &ClientConfig) -> PathBuf {
    config.cookie_jar_path.clone().unwrap_or_else(|| {
        BaseDirs::new().map_or_else(
            || PathBuf::from("./session.cookies"),
            |dirs| dirs.config_dir().join("kasetfair").join("session.cookies"),
        )
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create session directory {}", parent.display()))?;
    }
    Ok(())
}

pub fn build_client(jar: Arc<Jar>) -> Result<Client> {
    Client::builder()
        .cookie_provider(jar)
        .user_agent("kasetfair-cli")
        .build()
        .context("failed to build HTTP client")
}

fn add_cookies(jar: &Jar, header: &str, origin: &Url) {
    for entry in header.split(';') {
        let cookie = entry.trim();
        if !cookie.is_empty() {
            jar.add_cookie_str(cookie, origin);
        }
    }
}

pub fn load_cookie_jar(origin: &Url, path: &Path) -> Result<Arc<Jar>> {
    if !path.exists() {
        bail!("session cookie jar not found at {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session jar {}", path.display()))?;
    let jar = Arc::new(Jar::default());
    add_cookies(&jar, &contents, origin);
    Ok(jar)
}

pub fn persist_cookie_jar(jar: &Arc<Jar>, origin: &Url, path: &Path) -> Result<()> {
    if let Some(header) = jar.cookies(origin) {
        ensure_parent(path)?;
        fs::write(path, header.to_str()?.as_bytes())
            .with_context(|| format!("failed to write session jar at {}", path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .context("failed to set session jar permissions")?;
        }
    } else if path.exists() {
        fs::remove_file(path).ok();
    }
    Ok(())
}
