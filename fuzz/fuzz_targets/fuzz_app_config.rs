#![no_main]

use figment::Figment;
use figment::providers::{Format, Serialized, Yaml};
use libfuzzer_sys::fuzz_target;
use lmc_bootstrap::AppConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Malformed documents must be rejected, never panic
        let _ = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::string(s))
            .extract::<AppConfig>();
    }
});
