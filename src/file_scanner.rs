use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    extensions: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            // Literal path mode: join onto the base for prefix matching
            let path = Path::new(base_dir).join(p);
            literal_ignore_paths.push(path);
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                // Glob mode: expand pattern to matching directories
                let full_pattern = Path::new(base_dir).join(inc);
                let pattern_str = full_pattern.to_string_lossy();
                match glob(&pattern_str) {
                    Ok(entries) => {
                        for entry in entries.flatten() {
                            if entry.is_dir() {
                                paths.push(entry);
                            }
                        }
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid glob pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            } else {
                // Literal path mode: use as-is
                let path = Path::new(base_dir).join(inc);
                if path.exists() {
                    paths.push(path);
                } else if verbose {
                    eprintln!(
                        "{} Include path does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            // Literal ignore paths match by prefix
            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && has_extension(path, extensions) {
                files.insert(path_str.into());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|wanted| wanted == e))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn default_extensions() -> Vec<String> {
        ["js", "mjs", "cjs", "jsx", "ts", "tsx"].map(String::from).to_vec()
    }

    #[test]
    fn test_scan_source_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.js")).unwrap();
        File::create(dir_path.join("util.mjs")).unwrap();
        File::create(dir_path.join("style.css")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &[],
            &[],
            &default_extensions(),
            false,
        );

        assert_eq!(result.files.len(), 2);
        assert!(result.files.iter().any(|f| f.ends_with("app.js")));
        assert!(result.files.iter().any(|f| f.ends_with("util.mjs")));
        assert!(!result.files.iter().any(|f| f.ends_with("style.css")));
    }

    #[test]
    fn test_scan_ignores_node_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let node_modules = dir_path.join("node_modules");
        fs::create_dir(&node_modules).unwrap();
        File::create(node_modules.join("lib.js")).unwrap();

        File::create(dir_path.join("app.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &[],
            &["**/node_modules/**".to_owned()],
            &default_extensions(),
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("app.js")));
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let src = dir_path.join("src");
        fs::create_dir(&src).unwrap();
        File::create(src.join("app.js")).unwrap();

        let lib = dir_path.join("lib");
        fs::create_dir(&lib).unwrap();
        File::create(lib.join("utils.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["src".to_owned()],
            &[],
            &default_extensions(),
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("src/app.js")));
    }

    #[test]
    fn test_scan_with_literal_ignore_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let src = dir_path.join("src");
        fs::create_dir(&src).unwrap();
        File::create(src.join("app.js")).unwrap();

        let generated = src.join("generated");
        fs::create_dir(&generated).unwrap();
        File::create(generated.join("api.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &[],
            &["src/generated".to_owned()],
            &default_extensions(),
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(!result.files.iter().any(|f| f.contains("generated")));
    }

    #[test]
    fn test_scan_with_nonexistent_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let src = dir_path.join("src");
        fs::create_dir(&src).unwrap();
        File::create(src.join("app.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["src".to_owned(), "nonexistent".to_owned()],
            &[],
            &default_extensions(),
            false,
        );

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("page.vue")).unwrap();
        File::create(dir_path.join("app.js")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &[],
            &[],
            &["vue".to_owned()],
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("page.vue")));
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/*"));
        assert!(is_glob_pattern("src/**/*.js"));
        assert!(is_glob_pattern("file?.js"));
        assert!(!is_glob_pattern("src"));
        assert!(!is_glob_pattern("src/components"));
    }
}
