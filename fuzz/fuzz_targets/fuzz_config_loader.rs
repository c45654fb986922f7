#![no_main]

use libfuzzer_sys::fuzz_target;
use schedcfg::config::{ConfigLoader, CrossFieldMode, FieldKey, LoaderOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for cross_field in [CrossFieldMode::Deferred, CrossFieldMode::Sequential] {
        let options = LoaderOptions {
            cross_field,
            ..LoaderOptions::default()
        };
        let mut loader = ConfigLoader::new(options);

        // Any accepted configuration must satisfy every field rule.
        if let Ok(result) = loader.load_from_str(text, "fuzz.txt") {
            let config = &result.config;
            assert!((1..=128).contains(&config.cpu_count()));
            for key in [
                FieldKey::MaxOverallMem,
                FieldKey::MemPerFrame,
                FieldKey::MinMemPerProc,
                FieldKey::MaxMemPerProc,
            ] {
                let value = key.numeric_value(config).unwrap_or(0);
                assert!(value.is_power_of_two() && (2..=1 << 32).contains(&value));
            }
            if cross_field == CrossFieldMode::Deferred {
                assert!(config.mem_per_frame() <= config.max_overall_mem());
                assert!(config.max_mem_per_proc() >= config.min_mem_per_proc());
            }
        }
    }
});
