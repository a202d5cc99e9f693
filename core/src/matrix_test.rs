#[cfg(test)]
mod tests {
    use crate::driver::RunConfig;
    use crate::matrix::MatrixSpec;

    #[test]
    fn test_default_matrix_covers_the_full_sweep() {
        let spec = MatrixSpec::default();
        let raws = spec.expand();
        // 2 families x 2 implementations x 3 arguments x 1 count.
        assert_eq!(raws.len(), 12);
        assert_eq!(raws[0].family, "any-view");
        assert_eq!(raws[0].version, "native");
        assert_eq!(raws[0].argument, "true");
        assert_eq!(raws[0].n, 5e6);
        assert_eq!(raws[11].family, "byte-view");
        assert_eq!(raws[11].version, "scripted");
        assert_eq!(raws[11].argument, "false-object");
    }

    #[test]
    fn test_every_default_entry_resolves() {
        for raw in MatrixSpec::default().expand() {
            RunConfig::resolve(&raw).unwrap();
        }
    }

    #[test]
    fn test_expansion_order_is_family_version_argument_n() {
        let spec = MatrixSpec {
            family: vec!["any-view".into(), "byte-view".into()],
            version: vec!["native".into()],
            argument: vec!["true".into()],
            n: vec![1.0, 2.0],
        };
        let raws = spec.expand();
        assert_eq!(raws.len(), 4);
        assert_eq!((raws[0].family.as_str(), raws[0].n), ("any-view", 1.0));
        assert_eq!((raws[1].family.as_str(), raws[1].n), ("any-view", 2.0));
        assert_eq!((raws[2].family.as_str(), raws[2].n), ("byte-view", 1.0));
        assert_eq!((raws[3].family.as_str(), raws[3].n), ("byte-view", 2.0));
    }

    #[test]
    fn test_empty_axis_produces_no_runs() {
        let spec = MatrixSpec {
            version: vec![],
            ..MatrixSpec::default()
        };
        assert!(spec.expand().is_empty());
    }

    #[test]
    fn test_toml_overrides_and_defaults() {
        let spec = MatrixSpec::from_toml_str(
            r#"
            version = ["js"]
            n = [100.0]
            "#,
        )
        .unwrap();
        assert_eq!(spec.version, vec!["js"]);
        assert_eq!(spec.n, vec![100.0]);
        // Unlisted axes keep the full default sweep.
        assert_eq!(spec.family.len(), 2);
        assert_eq!(spec.argument.len(), 3);
        assert_eq!(spec.expand().len(), 6);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = MatrixSpec::from_toml_str("iterations = [5]").unwrap_err();
        assert!(err.to_string().contains("parse matrix TOML"));
    }

    #[test]
    fn test_load_reads_a_matrix_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.toml");
        std::fs::write(&path, "family = [\"byte-view\"]\nn = [10.0]\n").unwrap();
        let spec = MatrixSpec::load(&path).unwrap();
        assert_eq!(spec.family, vec!["byte-view"]);
        assert_eq!(spec.expand().len(), 6);
    }

    #[test]
    fn test_load_missing_file_names_the_path() {
        let err = MatrixSpec::load(std::path::Path::new("/definitely/missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
