//! Repository layout checks: unit mirrors, module wiring, scenario and bench targets

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Files that only wire modules together and carry no behavior of their own
    fn is_wiring(relative: &str) -> bool {
        matches!(relative, "main.rs" | "lib.rs") || relative.ends_with("mod.rs")
    }

    /// Relative paths of every `.rs` file below `root`, with `/` separators
    fn rust_files(root: &Path) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                    continue;
                }
                let relative = path
                    .strip_prefix(root)
                    .map_err(|_| io::Error::other("path escaped its root"))?;
                found.insert(relative.to_string_lossy().replace('\\', "/"));
            }
        }

        Ok(found)
    }

    fn listing(label: &str, paths: &[&String]) -> String {
        paths
            .iter()
            .map(|path| format!("  - {label}{path}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_unit_tests_mirror_source_files() {
        let sources = rust_files(Path::new("src")).expect("Failed to scan src");
        let units = rust_files(Path::new("tests/unit")).expect("Failed to scan tests/unit");

        let untested: Vec<_> = sources
            .iter()
            .filter(|path| !is_wiring(path) && !units.contains(*path))
            .collect();
        let orphaned: Vec<_> = units
            .iter()
            .filter(|path| !is_wiring(path) && !sources.contains(*path))
            .collect();

        assert!(
            untested.is_empty(),
            "Source files without a tests/unit counterpart:\n{}",
            listing("src/", &untested)
        );
        assert!(
            orphaned.is_empty(),
            "Unit test files without a src counterpart:\n{}",
            listing("tests/unit/", &orphaned)
        );
    }

    /// A unit file that no `mod` line reaches never compiles, so its tests silently vanish
    #[test]
    fn test_unit_files_are_declared_by_their_parent() {
        let root = Path::new("tests/unit");
        let units = rust_files(root).expect("Failed to scan tests/unit");
        let mut undeclared = Vec::new();

        for path in &units {
            if path == "main.rs" || path.ends_with("mod.rs") {
                continue;
            }
            let (parent, file) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
            let module = file.trim_end_matches(".rs");
            let declaring = if parent.is_empty() {
                root.join("main.rs")
            } else {
                root.join(parent).join("mod.rs")
            };

            let declaration = format!("mod {module};");

            let declared = fs::read_to_string(&declaring)
                .is_ok_and(|content| content.lines().any(|line| line.trim() == declaration));
            if !declared {
                undeclared.push(path);
            }
        }

        let declared_dirs =
            fs::read_to_string(root.join("main.rs")).expect("Failed to read tests/unit/main.rs");
        for dir in ["algorithm", "io", "math", "spatial"] {
            assert!(
                declared_dirs.contains(&format!("mod {dir};")),
                "tests/unit/main.rs must declare `mod {dir};`"
            );
        }

        assert!(
            undeclared.is_empty(),
            "Unit test files missing a `mod` line in their parent:\n{}",
            listing("tests/unit/", &undeclared)
        );
    }

    #[test]
    fn test_test_files_contain_tests() {
        let root = Path::new("tests");
        let files = rust_files(root).expect("Failed to scan tests");

        let empty: Vec<_> = files
            .iter()
            .filter(|path| !is_wiring(path))
            .filter(|path| {
                !fs::read_to_string(root.join(path.as_str()))
                    .is_ok_and(|content| content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            listing("tests/", &empty)
        );
    }

    #[test]
    fn test_solver_scenarios_drive_the_public_solver() {
        let content =
            fs::read_to_string("tests/solver.rs").expect("tests/solver.rs must hold the scenarios");

        let scenarios = content.matches("#[test]").count();
        assert!(scenarios >= 5, "tests/solver.rs declares only {scenarios} scenarios");
        // Integration scenarios go through the crate root, not private modules
        assert!(content.contains("use wavetile::"));
        assert!(content.contains("GridSolver"));
    }

    /// Names declared in `[[bench]]` tables of Cargo.toml
    fn declared_benches(manifest: &str) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut in_bench = false;

        for line in manifest.lines().map(str::trim) {
            if line.starts_with('[') {
                in_bench = line == "[[bench]]";
                continue;
            }
            if !in_bench {
                continue;
            }
            if let Some(value) = line.strip_prefix("name") {
                let name = value.trim_start().trim_start_matches('=').trim().trim_matches('"');
                names.insert(name.to_owned());
            }
        }

        names
    }

    #[test]
    fn test_bench_targets_match_bench_files() {
        let manifest = fs::read_to_string("Cargo.toml").expect("Failed to read Cargo.toml");
        let declared = declared_benches(&manifest);
        let files: BTreeSet<String> = rust_files(Path::new("benches"))
            .expect("Failed to scan benches")
            .into_iter()
            .map(|path| path.trim_end_matches(".rs").to_owned())
            .collect();

        assert!(!declared.is_empty(), "Cargo.toml declares no [[bench]] targets");

        let unbacked: Vec<_> = declared.difference(&files).collect();
        let undeclared: Vec<_> = files.difference(&declared).collect();
        assert!(
            unbacked.is_empty(),
            "Bench targets without a file:\n{}",
            listing("benches/", &unbacked)
        );
        assert!(
            undeclared.is_empty(),
            "Bench files not declared as [[bench]] with harness = false:\n{}",
            listing("benches/", &undeclared)
        );
        assert_eq!(
            manifest.matches("harness = false").count(),
            declared.len(),
            "Every criterion bench needs `harness = false`"
        );
    }
}
