//! Identifier generation for locally created quotes

use rand::Rng;

/// Prefix applied to identifiers of locally created quotes
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Generate a local identifier: `local-<unix millis>-<0..1000>`.
///
/// Two quotes created in the same millisecond collide with probability 1/1000;
/// collisions are not detected.
pub fn generate_local_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("{}{}-{}", LOCAL_ID_PREFIX, millis, suffix)
}

/// Whether an identifier was generated locally
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = generate_local_id();
        assert!(is_local_id(&id));

        let parts: Vec<&str> = id.trim_start_matches(LOCAL_ID_PREFIX).split('-').collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].parse::<i64>().is_ok());
        assert!(parts[1].parse::<u32>().unwrap() < 1000);
    }

    #[test]
    fn test_remote_id_is_not_local() {
        assert!(!is_local_id("server-1"));
    }
}
