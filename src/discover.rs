use std::path::Path;

use tracing::debug;

use crate::types::BenchmarkEntry;

/// Discover benchmark programs directly inside `dir` whose file name ends in
/// `.{extension}`. A file named just `.{extension}` counts too.
///
/// Entries are sorted by file name so the report order is stable across runs.
/// A missing or unreadable directory yields an empty list rather than an error;
/// individual entries that cannot be inspected are skipped.
pub fn discover_benchmarks(dir: &Path, extension: &str) -> Vec<BenchmarkEntry> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "benchmark directory not readable");
            return vec![];
        }
    };

    let suffix = format!(".{}", extension);
    let mut benchmarks = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(&suffix) {
            continue;
        }

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let path = match std::fs::canonicalize(&path) {
            Ok(p) => p,
            Err(_) => continue,
        };

        benchmarks.push(BenchmarkEntry { name, path });
    }

    benchmarks.sort_by(|a, b| a.name.cmp(&b.name));

    benchmarks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn sorted_by_file_name() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(tmp.path().join("zoo.lox"), "").unwrap();
        fs::write(tmp.path().join("fib.lox"), "").unwrap();
        fs::write(tmp.path().join("binary_trees.lox"), "").unwrap();

        let result = discover_benchmarks(tmp.path(), "lox");
        let names: Vec<_> = result.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["binary_trees.lox", "fib.lox", "zoo.lox"]);
    }

    #[test]
    fn ordering_is_bytewise() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(tmp.path().join("b.lox"), "").unwrap();
        fs::write(tmp.path().join("Z.lox"), "").unwrap();
        fs::write(tmp.path().join("a10.lox"), "").unwrap();
        fs::write(tmp.path().join("a2.lox"), "").unwrap();

        let result = discover_benchmarks(tmp.path(), "lox");
        let names: Vec<_> = result.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Z.lox", "a10.lox", "a2.lox", "b.lox"]);
    }

    #[test]
    fn paths_are_absolute() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(tmp.path().join("fib.lox"), "").unwrap();

        let result = discover_benchmarks(tmp.path(), "lox");
        assert_eq!(result.len(), 1);
        assert!(result[0].path.is_absolute());
        assert_eq!(result[0].path.file_name().unwrap(), "fib.lox");
    }

    #[test]
    fn other_extensions_ignored() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(tmp.path().join("fib.lox"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join("fib.lox.bak"), "").unwrap();
        fs::write(tmp.path().join("README"), "").unwrap();

        let result = discover_benchmarks(tmp.path(), "lox");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "fib.lox");
    }

    #[test]
    fn directories_and_nested_files_ignored() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("weird.lox")).unwrap();
        let nested = tmp.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.lox"), "").unwrap();
        fs::write(tmp.path().join("top.lox"), "").unwrap();

        let result = discover_benchmarks(tmp.path(), "lox");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "top.lox");
    }

    #[test]
    fn bare_suffix_file_included() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(tmp.path().join(".lox"), "").unwrap();
        fs::write(tmp.path().join("fib.lox"), "").unwrap();
        fs::write(tmp.path().join("fiblox"), "").unwrap();

        let result = discover_benchmarks(tmp.path(), "lox");
        let names: Vec<_> = result.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, [".lox", "fib.lox"]);
    }

    #[test]
    fn custom_extension() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(tmp.path().join("fib.lox"), "").unwrap();
        fs::write(tmp.path().join("fib.clox"), "").unwrap();

        let result = discover_benchmarks(tmp.path(), "clox");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "fib.clox");
    }

    #[test]
    fn empty_directory() {
        let tmp = assert_fs::TempDir::new().unwrap();
        assert!(discover_benchmarks(tmp.path(), "lox").is_empty());
    }

    #[test]
    fn missing_directory_is_empty() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let result = discover_benchmarks(&tmp.path().join("does-not-exist"), "lox");
        assert!(result.is_empty());
    }
}
