use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;

use crate::favorites::FavoriteCity;

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum IpcCommand {
    AddCity { name: String, zone: String },
    RemoveCity { id: String },
    ListCities,
    ListZones,
    GetState,
    ReloadConfig,
    Quit,
}

#[derive(Debug, Serialize)]
pub struct ZoneInfo {
    pub id: String,
    pub name: String,
    pub offset: String,
    pub has_dst: bool,
}

#[derive(Debug, Serialize)]
pub struct IpcResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<FavoriteCity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<FavoriteCity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<ZoneInfo>>,
    // State fields (only for get-state)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_period_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_path: Option<String>,
}

impl IpcResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
            city: None,
            cities: None,
            zones: None,
            refresh_period_secs: None,
            favorites_count: None,
            config_path: None,
            favorites_path: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self { ok: false, error: Some(msg.into()), ..Self::ok() }
    }

    pub fn with_city(city: FavoriteCity) -> Self {
        Self { city: Some(city), ..Self::ok() }
    }

    pub fn with_cities(cities: Vec<FavoriteCity>) -> Self {
        Self { cities: Some(cities), ..Self::ok() }
    }

    pub fn with_zones(zones: Vec<ZoneInfo>) -> Self {
        Self { zones: Some(zones), ..Self::ok() }
    }

    pub fn state(
        refresh_period_secs: u64,
        favorites_count: usize,
        config_path: &str,
        favorites_path: &str,
    ) -> Self {
        Self {
            refresh_period_secs: Some(refresh_period_secs),
            favorites_count: Some(favorites_count),
            config_path: Some(config_path.into()),
            favorites_path: Some(favorites_path.into()),
            ..Self::ok()
        }
    }
}

pub fn socket_path(override_path: Option<&PathBuf>) -> PathBuf {
    if let Some(p) = override_path {
        return p.clone();
    }
    if let Ok(dir) = std::env::var("XDG_RUNTIME_DIR") {
        PathBuf::from(dir).join("zonewatch.sock")
    } else {
        let uid = unsafe { libc::getuid() };
        PathBuf::from(format!("/tmp/zonewatch-{}.sock", uid))
    }
}

pub fn create_listener(path: &PathBuf) -> Result<UnixListener> {
    // Remove stale socket
    if path.exists() {
        // Check if another instance is running
        if UnixStream::connect(path).is_ok() {
            anyhow::bail!("Another zonewatch instance is already running (socket {} is active)", path.display());
        }
        std::fs::remove_file(path)?;
    }

    let listener = UnixListener::bind(path)?;
    listener.set_nonblocking(true)?;
    log::info!("IPC listening on {}", path.display());
    Ok(listener)
}

pub fn cleanup_socket(path: &PathBuf) {
    if path.exists() {
        let _ = std::fs::remove_file(path);
        log::info!("Removed socket {}", path.display());
    }
}

pub fn read_command(stream: &UnixStream) -> Result<IpcCommand> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let cmd: IpcCommand = serde_json::from_str(line.trim())?;
    Ok(cmd)
}

pub fn write_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
    let json = serde_json::to_string(response)?;
    stream.write_all(json.as_bytes())?;
    stream.write_all(b"\n")?;
    stream.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_kebab_case_json() {
        let cmd: IpcCommand =
            serde_json::from_str(r#"{"cmd": "add-city", "name": "Mumbai", "zone": "india"}"#).unwrap();
        match cmd {
            IpcCommand::AddCity { name, zone } => {
                assert_eq!(name, "Mumbai");
                assert_eq!(zone, "india");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(matches!(
            serde_json::from_str::<IpcCommand>(r#"{"cmd": "list-cities"}"#).unwrap(),
            IpcCommand::ListCities
        ));
    }

    #[test]
    fn responses_omit_absent_fields() {
        let json = serde_json::to_string(&IpcResponse::ok()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);

        let json = serde_json::to_string(&IpcResponse::err("nope")).unwrap();
        assert_eq!(json, r#"{"ok":false,"error":"nope"}"#);
    }
}
