use std::env;

/// Longest default credential that fits the login table
const MAX_CREDENTIAL_LEN: usize = 25;

/// Longest SSID/passphrase that fits the WiFi table
const MAX_WIFI_TEXT_LEN: usize = 30;

fn export(name: &str, default: &str, max_len: Option<usize>, secret: bool) {
    let value = match env::var(name) {
        Ok(value) => {
            if secret {
                println!("cargo:warning=Using {} from environment (hidden)", name);
            } else {
                println!("cargo:warning=Using {} from environment: {}", name, value);
            }
            value
        }
        Err(_) => default.to_string(),
    };

    if let Some(max_len) = max_len {
        if value.len() > max_len {
            panic!("{} is {} bytes, the table holds at most {}", name, value.len(), max_len);
        }
    }

    println!("cargo:rustc-env={}={}", name, value);
    println!("cargo:rerun-if-env-changed={}", name);
}

fn main() {
    // Factory defaults written on first boot and on factory reset

    // Web UI login, also used as the access-point SSID/passphrase
    export("CONFDB_DEFAULT_USER", "admin", Some(MAX_CREDENTIAL_LEN), false);
    export("CONFDB_DEFAULT_PASSWORD", "admin", Some(MAX_CREDENTIAL_LEN), true);

    // Station network to join
    export("CONFDB_DEFAULT_SSID", "", Some(MAX_WIFI_TEXT_LEN), false);
    export("CONFDB_DEFAULT_PASSPHRASE", "", Some(MAX_WIFI_TEXT_LEN), true);

    // Firmware version stamped into the global table (decimal, YYYYMMDDNN)
    export("CONFDB_FIRMWARE_VERSION", "2019041100", None, false);
    if let Ok(version) = env::var("CONFDB_FIRMWARE_VERSION") {
        if version.parse::<u32>().is_err() {
            panic!("CONFDB_FIRMWARE_VERSION must be a decimal u32, got {}", version);
        }
    }
}
