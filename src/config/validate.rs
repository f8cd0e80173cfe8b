// src/config/validate.rs

use anyhow::{Context, Result, anyhow};

use crate::config::duration::parse_duration;
use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - all stage commands are non-empty
/// - probe/confirm intervals parse and attempt counts are >= 1
/// - the RPC and frontend URLs look like http(s) URLs
/// - any addresses present in `[seed]` are 20-byte hex addresses
///
/// It does **not** require `[seed]` addresses to be present; that is enforced
/// when the seed subcommand resolves its config.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_commands(cfg)?;
    validate_probe_settings(cfg)?;
    validate_urls(cfg)?;
    validate_seed_section(cfg)?;
    Ok(())
}

fn ensure_commands(cfg: &ConfigFile) -> Result<()> {
    let commands = [
        ("[node].cmd", &cfg.node.cmd),
        ("[deploy].cmd", &cfg.deploy.cmd),
        ("[frontend].install_cmd", &cfg.frontend.install_cmd),
        ("[frontend].start_cmd", &cfg.frontend.start_cmd),
    ];
    for (field, cmd) in commands {
        if cmd.trim().is_empty() {
            return Err(anyhow!("{} must not be empty", field));
        }
    }
    Ok(())
}

fn validate_probe_settings(cfg: &ConfigFile) -> Result<()> {
    parse_duration(&cfg.node.readiness.interval).context("invalid [node.readiness].interval")?;
    if cfg.node.readiness.max_attempts == 0 {
        return Err(anyhow!("[node.readiness].max_attempts must be >= 1 (got 0)"));
    }

    parse_duration(&cfg.seed.confirm_interval).context("invalid [seed].confirm_interval")?;
    if cfg.seed.confirm_max_attempts == 0 {
        return Err(anyhow!("[seed].confirm_max_attempts must be >= 1 (got 0)"));
    }

    Ok(())
}

fn validate_urls(cfg: &ConfigFile) -> Result<()> {
    let urls = [
        ("[node].rpc_url", Some(cfg.node.rpc_url.as_str())),
        ("[frontend].url", Some(cfg.frontend.url.as_str())),
        ("[seed].rpc_url", cfg.seed.rpc_url.as_deref()),
    ];
    for (field, url) in urls {
        if let Some(url) = url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow!("{} must be an http(s) URL (got '{}')", field, url));
            }
        }
    }
    Ok(())
}

fn validate_seed_section(cfg: &ConfigFile) -> Result<()> {
    if let Some(ref addr) = cfg.seed.contract_address {
        check_address(addr, "[seed].contract_address")?;
    }
    if let Some(ref addr) = cfg.seed.owner_address {
        check_address(addr, "[seed].owner_address")?;
    }
    Ok(())
}

/// Check that a string is a `0x`-prefixed 20-byte hex address.
pub fn check_address(addr: &str, field: &str) -> Result<()> {
    let hex = addr
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("{} must start with 0x (got '{}')", field, addr))?;
    if hex.len() != 40 {
        return Err(anyhow!(
            "{} must be 20 bytes of hex after 0x (got {} hex chars)",
            field,
            hex.len()
        ));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("{} contains non-hex characters: '{}'", field, addr));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        assert!(validate_config(&ConfigFile::default()).is_ok());
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.deploy.cmd = "   ".to_string();
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("[deploy].cmd"));
    }

    #[test]
    fn zero_probe_attempts_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.node.readiness.max_attempts = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn bad_probe_interval_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.node.readiness.interval = "soon".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn non_http_rpc_url_rejected() {
        let mut cfg = ConfigFile::default();
        cfg.node.rpc_url = "ws://127.0.0.1:8545".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn address_shape_is_checked() {
        assert!(check_address("0x5FbDB2315678afecb367f032d93F642f64180aa3", "f").is_ok());
        assert!(check_address("5FbDB2315678afecb367f032d93F642f64180aa3", "f").is_err());
        assert!(check_address("0x1234", "f").is_err());
        assert!(check_address("0xZZbDB2315678afecb367f032d93F642f64180aa3", "f").is_err());
    }
}
