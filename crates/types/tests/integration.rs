//! Integration tests for types

#[cfg(test)]
mod tests {
    use mso_types::*;
    use proptest::prelude::*;

    fn tenants(ids: &[u64]) -> TenantSet {
        ids.iter().copied().filter_map(TenantId::new).collect()
    }

    proptest! {
        #[test]
        fn prop_registered_tenant_tables_carry_their_id(
            id in 1u64..1_000_000,
            suffix in "[a-z][a-z_]{0,20}",
        ) {
            let table = format!("wp_{id}_{suffix}");
            let extracted = tenant_id_from_table_name(&table, "wp_");
            prop_assert_eq!(extracted.map(TenantId::get), Some(id));
            prop_assert!(TablePattern::TenantScoped { prefix: "wp_".into() }.matches(&table), "tenant-scoped pattern should match");
        }

        #[test]
        fn prop_label_tables_never_match_tenant_pattern(digest in "[0-9a-f]{8,40}") {
            let table = format!("wp_label_{digest}");
            prop_assert!(!TablePattern::TenantScoped { prefix: "wp_".into() }.matches(&table), "tenant-scoped pattern should not match");
            prop_assert!(tenant_id_from_table_name(&table, "wp_").is_none());
        }

        #[test]
        fn prop_limit_never_exceeds_input(len in 0usize..50, limit in -5i64..60) {
            let items: Vec<usize> = (0..len).collect();
            let selected = RunOptions::new(false, limit).select(&items);
            prop_assert!(selected.len() <= items.len());
            if limit < 0 {
                prop_assert!(selected.is_empty());
            } else if limit == 0 {
                prop_assert_eq!(selected.len(), len);
            } else {
                prop_assert_eq!(selected, &items[..(limit as usize).min(len)]);
            }
        }
    }

    #[test]
    fn test_tenant_set_from_ids() {
        let set = tenants(&[0, 1, 2, 3]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().map(TenantId::get).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_output_format_default() {
        let fmt = OutputFormat::default();
        assert_eq!(fmt, OutputFormat::Tty);
    }

    #[test]
    fn test_tally_serialization() {
        let tally = OperationTally {
            changed: 1,
            failed: 2,
            skipped: 0,
        };
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"changed":1,"failed":2,"skipped":0}"#);
    }
}
