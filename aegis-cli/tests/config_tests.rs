use aegis_cli::{Config, ConfigError};
use serial_test::serial;

/// Wipes every variable the loader reads, then applies the given pairs.
/// Tests mutate the process environment, hence `#[serial]` everywhere.
fn set_env(vars: &[(&str, &str)]) {
    const ALL: &[&str] = &[
        "PRIMARY",
        "REPLICAS",
        "FULL_SYNC",
        "CRON",
        "CLIENT_TIMEOUT_SECONDS",
        "SYNC_GRAVITY_DHCP_LEASES",
        "SYNC_GRAVITY_GROUP",
        "SYNC_GRAVITY_AD_LIST",
        "SYNC_GRAVITY_AD_LIST_BY_GROUP",
        "SYNC_GRAVITY_DOMAIN_LIST",
        "SYNC_GRAVITY_DOMAIN_LIST_BY_GROUP",
        "SYNC_GRAVITY_CLIENT",
        "SYNC_GRAVITY_CLIENT_BY_GROUP",
        "SYNC_CONFIG_DNS",
        "SYNC_CONFIG_DHCP",
        "SYNC_CONFIG_NTP",
        "SYNC_CONFIG_RESOLVER",
        "SYNC_CONFIG_DATABASE",
        "SYNC_CONFIG_MISC",
        "SYNC_CONFIG_DEBUG",
    ];
    for name in ALL {
        std::env::remove_var(name);
    }
    for (name, value) in vars {
        std::env::set_var(name, value);
    }
}

fn minimal_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("PRIMARY", "http://primary:8080|primary-secret"),
        ("REPLICAS", "http://replica1|alpha-token,http://replica2|beta-token"),
        ("FULL_SYNC", "true"),
    ]
}

// ── Required variables ────────────────────────────────────────────

#[test]
#[serial]
fn loads_minimal_full_sync_config() {
    set_env(&minimal_env());
    let conf = Config::load().unwrap();

    assert_eq!(conf.primary.secret(), "primary-secret");
    assert_eq!(conf.replicas.len(), 2);
    assert_eq!(conf.replicas[0].base_url().host_str(), Some("replica1"));
    assert_eq!(conf.replicas[1].base_url().host_str(), Some("replica2"));
    assert!(conf.full_sync);
    assert!(conf.cron.is_none());
    assert!(conf.sync_settings.is_none());
    assert_eq!(conf.client_timeout.as_secs(), 5);
}

#[test]
#[serial]
fn missing_primary_names_the_variable() {
    set_env(&[
        ("REPLICAS", "http://replica1|alpha-token"),
        ("FULL_SYNC", "true"),
    ]);
    match Config::load() {
        Err(ConfigError::Missing(name)) => assert_eq!(name, "PRIMARY"),
        other => panic!("expected missing PRIMARY, got {other:?}"),
    }
}

#[test]
#[serial]
fn missing_full_sync_fails() {
    set_env(&[
        ("PRIMARY", "http://primary|primary-secret"),
        ("REPLICAS", "http://replica1|alpha-token"),
    ]);
    assert!(matches!(Config::load(), Err(ConfigError::Missing("FULL_SYNC"))));
}

#[test]
#[serial]
fn malformed_primary_is_invalid() {
    let mut env = minimal_env();
    env[0] = ("PRIMARY", "http://primary:8080"); // no separator
    set_env(&env);
    match Config::load() {
        Err(ConfigError::Invalid { name, .. }) => assert_eq!(name, "PRIMARY"),
        other => panic!("expected invalid PRIMARY, got {other:?}"),
    }
}

#[test]
#[serial]
fn malformed_replica_url_is_invalid() {
    let mut env = minimal_env();
    env[1] = ("REPLICAS", "http://replica1|alpha-token,not a url|beta-token");
    set_env(&env);
    assert!(matches!(
        Config::load(),
        Err(ConfigError::Invalid { name: "REPLICAS", .. })
    ));
}

#[test]
#[serial]
fn replica_order_is_preserved() {
    let mut env = minimal_env();
    env[1] = ("REPLICAS", "http://c|1, http://a|2 ,http://b|3");
    set_env(&env);
    let conf = Config::load().unwrap();
    let hosts: Vec<_> = conf
        .replicas
        .iter()
        .map(|r| r.base_url().host_str().unwrap().to_string())
        .collect();
    assert_eq!(hosts, vec!["c", "a", "b"]);
}

#[test]
#[serial]
fn non_boolean_full_sync_is_invalid() {
    let mut env = minimal_env();
    env[2] = ("FULL_SYNC", "yes");
    set_env(&env);
    assert!(matches!(
        Config::load(),
        Err(ConfigError::Invalid { name: "FULL_SYNC", .. })
    ));
}

// ── Selective-sync toggles ────────────────────────────────────────

#[test]
#[serial]
fn manual_mode_loads_toggles() {
    let mut env = minimal_env();
    env[2] = ("FULL_SYNC", "false");
    env.push(("SYNC_GRAVITY_AD_LIST", "true"));
    env.push(("SYNC_CONFIG_DNS", "true"));
    set_env(&env);

    let conf = Config::load().unwrap();
    let settings = conf.sync_settings.unwrap();
    assert!(settings.gravity.adlist);
    assert!(settings.config.dns);
    // Everything not set stays off.
    assert!(!settings.gravity.group);
    assert!(!settings.config.dhcp);
}

#[test]
#[serial]
fn full_sync_ignores_toggles_entirely() {
    let mut env = minimal_env();
    env.push(("SYNC_GRAVITY_AD_LIST", "true"));
    set_env(&env);

    let conf = Config::load().unwrap();
    assert!(conf.sync_settings.is_none());
}

#[test]
#[serial]
fn invalid_toggle_value_is_rejected() {
    let mut env = minimal_env();
    env[2] = ("FULL_SYNC", "false");
    env.push(("SYNC_CONFIG_DNS", "enabled"));
    set_env(&env);
    assert!(matches!(
        Config::load(),
        Err(ConfigError::Invalid { name: "SYNC_CONFIG_DNS", .. })
    ));
}

// ── Schedule and timeout ──────────────────────────────────────────

#[test]
#[serial]
fn five_field_cron_is_accepted() {
    let mut env = minimal_env();
    env.push(("CRON", "*/5 * * * *"));
    set_env(&env);
    let conf = Config::load().unwrap();
    assert!(conf.cron.is_some());
}

#[test]
#[serial]
fn six_field_cron_is_accepted() {
    let mut env = minimal_env();
    env.push(("CRON", "0 0 3 * * *"));
    set_env(&env);
    assert!(Config::load().unwrap().cron.is_some());
}

#[test]
#[serial]
fn invalid_cron_is_rejected_at_load() {
    let mut env = minimal_env();
    env.push(("CRON", "every day at noon"));
    set_env(&env);
    assert!(matches!(
        Config::load(),
        Err(ConfigError::Invalid { name: "CRON", .. })
    ));
}

#[test]
#[serial]
fn client_timeout_is_configurable() {
    let mut env = minimal_env();
    env.push(("CLIENT_TIMEOUT_SECONDS", "30"));
    set_env(&env);
    assert_eq!(Config::load().unwrap().client_timeout.as_secs(), 30);
}

// ── Display ───────────────────────────────────────────────────────

#[test]
#[serial]
fn display_redacts_secrets() {
    set_env(&minimal_env());
    let conf = Config::load().unwrap();
    let printed = conf.to_string();

    assert!(printed.contains("http://primary:8080"));
    assert!(printed.contains("full_sync=true"));
    assert!(!printed.contains("primary-secret"));
    assert!(!printed.contains("alpha-token"));
    assert!(!printed.contains("beta-token"));
}
