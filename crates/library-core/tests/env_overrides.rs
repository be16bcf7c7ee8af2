//! Environment overrides for `LibraryConfig::load`.
//!
//! Kept in its own test binary with a single test, since it mutates the
//! process environment.

use std::env;
use std::fs;

use library_core::{ConfigError, LibraryConfig};

const RESTOCK: &str = "LIBRARY_RESTOCK_ON_RETURN";
const DAILY_RATE: &str = "LIBRARY_DAILY_RATE_CENTS";
const BESTSELLER: &str = "LIBRARY_BESTSELLER_MULTIPLIER_BPS";
const PREMIUM: &str = "LIBRARY_PREMIUM_MULTIPLIER_BPS";

fn clear_overrides() {
    for key in [RESTOCK, DAILY_RATE, BESTSELLER, PREMIUM] {
        env::remove_var(key);
    }
}

#[test]
fn test_env_overrides_apply_after_file() {
    clear_overrides();

    let path = env::temp_dir().join(format!("library-core-env-{}.toml", std::process::id()));
    fs::write(
        &path,
        "[fees]\nbestseller_multiplier_bps = 12000\n\n[lending]\nrestock_on_return = false\n",
    )
    .unwrap();

    // File alone
    let config = LibraryConfig::load(Some(path.clone())).unwrap();
    assert!(!config.lending.restock_on_return);
    assert_eq!(config.fees.bestseller_multiplier_bps, 12_000);

    // Valid overrides win over the file; a garbage rate is ignored
    env::set_var(RESTOCK, "true");
    env::set_var(BESTSELLER, "20000");
    env::set_var(DAILY_RATE, "lots");

    let config = LibraryConfig::load(Some(path.clone())).unwrap();
    assert!(config.lending.restock_on_return);
    assert_eq!(config.fees.bestseller_multiplier_bps, 20_000);
    assert_eq!(config.fees.daily_rate_cents, 50);

    // Whitespace around a valid value is accepted
    env::set_var(DAILY_RATE, " 75 ");
    let config = LibraryConfig::load(Some(path.clone())).unwrap();
    assert_eq!(config.fees.daily_rate_cents, 75);

    // An override that breaks validation fails the load
    env::set_var(PREMIUM, "0");
    let err = LibraryConfig::load(Some(path.clone())).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert_eq!(
        err.to_string(),
        "Invalid library configuration: premium_multiplier_bps must be greater than 0"
    );

    // ...and load_or_default falls back to defaults rather than the file
    let fallback = LibraryConfig::load_or_default(Some(path.clone()));
    assert_eq!(fallback, LibraryConfig::default());

    clear_overrides();
    fs::remove_file(&path).unwrap();
}
