use hostel::config::{CONFIG_ENV, Config, LISTEN_ENV};
use hostel::error::ServerError;
use std::path::PathBuf;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.address, "0.0.0.0");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.workers, None);
    assert!(cfg.static_files.root.ends_with("www"));
    assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        "server:\n  address: 127.0.0.1\n  port: 3000\n  workers: 2\nstatic_files:\n  root: /srv/www\n",
    )
    .unwrap();

    assert_eq!(cfg.listen_addr(), "127.0.0.1:3000");
    assert_eq!(cfg.server.workers, Some(2));
    assert_eq!(cfg.static_files.root, PathBuf::from("/srv/www"));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("server:\n  port: 9000\n").unwrap();

    assert_eq!(cfg.server.address, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert!(cfg.static_files.root.ends_with("www"));
}

#[test]
fn test_config_rejects_zero_workers() {
    let err = Config::from_yaml_str("server:\n  workers: 0\n").unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn test_config_rejects_malformed_yaml() {
    let err = Config::from_yaml_str("server: [not, a, map]").unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn test_config_apply_listen() {
    let mut cfg = Config::default();

    cfg.apply_listen("127.0.0.1:8000").unwrap();
    assert_eq!(cfg.server.address, "127.0.0.1");
    assert_eq!(cfg.server.port, 8000);

    cfg.apply_listen("[::1]:9000").unwrap();
    assert_eq!(cfg.server.address, "::1");
    assert_eq!(cfg.server.port, 9000);

    assert!(cfg.apply_listen("no-port").is_err());
    assert!(cfg.apply_listen("host:http").is_err());
}

#[test]
fn test_config_load_from_env() {
    // The only test touching the environment, so no cross-test races.
    let file = std::env::temp_dir().join(format!("hostel-config-{}.yaml", std::process::id()));
    std::fs::write(&file, "server:\n  port: 4000\nstatic_files:\n  root: /tmp/site\n").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &file);
        std::env::remove_var(LISTEN_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.port, 4000);
    assert_eq!(cfg.static_files.root, PathBuf::from("/tmp/site"));

    unsafe {
        std::env::set_var(LISTEN_ENV, "127.0.0.1:5000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr(), "127.0.0.1:5000");
    assert_eq!(cfg.static_files.root, PathBuf::from("/tmp/site"));

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(LISTEN_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");

    let _ = std::fs::remove_file(file);
}
