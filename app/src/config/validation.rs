//! Setting value validation.

use link_oracle::SchemeRegistry;
use qr_engine::ErrorCorrection;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_PORT" => validate_int_range(value, 1, 65535)?,
        "QR_IMAGE_SIZE" => validate_int_range(value, 16, 4096)?,
        "QR_QUIET_ZONE" => validate_int_range(value, 0, 8)?,
        "MAX_SCREENS" => validate_int_range(value, 1, 4096)?,
        "QR_ERROR_CORRECTION" => {
            if ErrorCorrection::from_letter(value).is_none() {
                return Err("must be one of L, M, Q, H".into());
            }
        }
        "QR_OPENABLE_SCHEMES" => {
            SchemeRegistry::parse_list(value).map_err(|e| e.to_string())?;
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.trim().parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
