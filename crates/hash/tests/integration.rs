//! Integration tests for hash crate

#[cfg(test)]
mod tests {
    use mso_hash::*;

    #[test]
    fn test_digest_fits_identifier_budget() {
        // `wp_` + `WP_Multisite_Orphans` + `_` leaves 40 characters of 64
        let budget = 64 - "wp_".len() - "WP_Multisite_Orphans".len() - 1;
        let digest = name_digest("wp_3682_options", budget);
        assert_eq!(digest.len(), 40);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hex_prefix_never_exceeds_full_hash() {
        let hash = Hash::from_data(b"wp_1_posts");
        assert_eq!(hash.to_hex_prefix(1000).len(), 64);
        assert_eq!(hash.to_hex_prefix(8), hash.to_hex()[..8]);
    }
}
