use std::error::Error;
use std::fs;
use std::time::Duration;

use chainup::config::{load_and_validate, load_from_path};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn full_config_round_trips() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Chainup.toml");
    fs::write(
        &path,
        r#"
[node]
cmd = "anvil"
dir = "chain"
rpc_url = "http://127.0.0.1:9999"

[node.readiness]
interval = "250ms"
max_attempts = 10

[deploy]
cmd = "forge script Deploy"
dir = "chain"

[frontend]
install_cmd = "pnpm install"
start_cmd = "pnpm dev"
dir = "web"
url = "http://localhost:5173"

[seed]
contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
owner_address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
confirm_interval = "500ms"
confirm_max_attempts = 20
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.node.cmd, "anvil");
    assert_eq!(cfg.node.rpc_url, "http://127.0.0.1:9999");
    assert_eq!(cfg.node.readiness.max_attempts, 10);
    assert_eq!(cfg.deploy.dir, "chain");
    assert_eq!(cfg.frontend.url, "http://localhost:5173");

    let seed = cfg.seed.resolve(&cfg.node.rpc_url, None)?;
    assert_eq!(seed.rpc_url, "http://127.0.0.1:9999");
    assert_eq!(seed.confirm_interval, Duration::from_millis(500));
    assert_eq!(seed.confirm_max_attempts, 20);
    Ok(())
}

#[test]
fn missing_file_falls_back_to_conventional_defaults() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = load_and_validate(dir.path().join("Chainup.toml"))?;

    assert_eq!(cfg.node.cmd, "npx hardhat node");
    assert_eq!(cfg.node.rpc_url, "http://127.0.0.1:8545");
    assert_eq!(cfg.frontend.dir, "frontend");
    assert!(cfg.seed.contract_address.is_none());
    Ok(())
}

#[test]
fn partial_config_keeps_other_defaults() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Chainup.toml");
    fs::write(&path, "[node]\ncmd = \"anvil\"\n")?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.node.cmd, "anvil");
    assert_eq!(cfg.node.dir, ".");
    assert_eq!(cfg.deploy.cmd, "npx hardhat run scripts/deploy.js --network localhost");
    Ok(())
}

#[test]
fn malformed_toml_is_rejected_with_path_context() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Chainup.toml");
    fs::write(&path, "[node\ncmd = ")?;

    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Chainup.toml"));
    Ok(())
}

#[test]
fn bad_probe_interval_fails_validation() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Chainup.toml");
    fs::write(&path, "[node.readiness]\ninterval = \"soon\"\n")?;

    assert!(load_and_validate(&path).is_err());
    Ok(())
}

#[test]
fn malformed_seed_address_fails_validation() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Chainup.toml");
    fs::write(&path, "[seed]\ncontract_address = \"0x1234\"\n")?;

    let err = load_and_validate(&path).unwrap_err();
    assert!(err.to_string().contains("[seed].contract_address"));
    Ok(())
}
