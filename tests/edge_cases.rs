//! Edge case and error handling tests for dirprint


use harness::{TestDir, listing_lines, run_dirprint};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Columns of the listing line that mentions `name`.
fn columns_of(stdout: &str, name: &str) -> Vec<String> {
    listing_lines(stdout)
        .iter()
        .find(|l| l.split_whitespace().next() == Some(name))
        .unwrap_or_else(|| panic!("{} not listed in:\n{}", name, stdout))
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_symlink_to_file_is_a_link() {
    let dir = TestDir::new();
    dir.add_file("target.txt", "0123456789");
    dir.add_symlink("target.txt", "link.txt");

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "--type", "--size"]);
    assert!(success, "dirprint should succeed with symlink");
    assert_eq!(columns_of(&stdout, "link.txt"), vec!["link.txt", "Link", "0"]);
    assert_eq!(columns_of(&stdout, "target.txt"), vec!["target.txt", "File", "10"]);
    assert!(stdout.contains("0 directories, 1 files, 1 links"));
}

#[test]
#[cfg(unix)]
fn test_symlink_to_directory_is_not_followed() {
    let dir = TestDir::new();
    dir.add_file("realdir/file.txt", "data");
    dir.add_symlink("realdir", "linkdir");

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "-r", "--type"]);
    assert!(success, "dirprint should succeed with directory symlink");
    assert_eq!(columns_of(&stdout, "linkdir"), vec!["linkdir", "Directory"]);
    assert_eq!(stdout.matches("file.txt").count(), 1, "output:\n{}", stdout);
    assert!(stdout.contains("2 directories, 1 files, 0 links"));
}

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_no_infinite_loop() {
    let dir = TestDir::new();
    dir.add_file("subdir/file.txt", "data");
    dir.add_symlink("..", "subdir/parent");

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "-r"]);
    assert!(success, "dirprint should not hang on parent symlink");
    assert!(stdout.contains("parent"));
    assert_eq!(stdout.matches("file.txt").count(), 1);
}

#[test]
#[cfg(unix)]
fn test_broken_and_self_referential_symlinks() {
    let dir = TestDir::new();
    dir.add_file("real.txt", "data");
    dir.add_symlink("nonexistent.txt", "broken");
    dir.add_symlink("selfref", "selfref");

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "-r", "--type"]);
    assert!(success, "dirprint should handle dangling symlinks");
    assert_eq!(columns_of(&stdout, "broken"), vec!["broken", "Link"]);
    assert_eq!(columns_of(&stdout, "selfref"), vec!["selfref", "Link"]);
    assert!(stdout.contains("0 directories, 1 files, 2 links"));
}

// ============================================================================
// Permission Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_unreadable_directory() {
    let dir = TestDir::new();
    dir.add_file("readable/file.txt", "data");
    let unreadable = dir.add_dir("unreadable");
    fs::write(unreadable.join("hidden.txt"), "secret").expect("Failed to write file");

    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&unreadable, perms).expect("Failed to set permissions");
    // Permission bits do not stop root
    let enforced = fs::read_dir(&unreadable).is_err();

    let (stdout, stderr, success) = run_dirprint(dir.path(), &[".", "print", "-r", "--json"]);

    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&unreadable, perms).expect("Failed to restore permissions");

    assert!(success, "dirprint should skip unreadable directories");
    if !enforced {
        return;
    }
    assert!(stderr.contains("1 entries could not be read"), "stderr: {}", stderr);
    assert!(!stdout.contains("hidden.txt"));

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let children = json["root"]["children"].as_array().unwrap();
    assert_eq!(children[0]["name"], "readable");
    assert_eq!(children[0]["children"][0]["name"], "file.txt");
    assert_eq!(children[1]["name"], "unreadable");
    assert!(children[1]["remark"].as_str().is_some());
    assert!(children[0].get("remark").is_none());
}

#[test]
#[cfg(unix)]
fn test_unreadable_root_fails() {
    let dir = TestDir::new();
    let locked = dir.add_dir("locked");
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&locked, perms).expect("Failed to set permissions");
    let enforced = fs::read_dir(&locked).is_err();

    let (_stdout, stderr, success) = run_dirprint(dir.path(), &["locked", "print"]);

    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&locked, perms).expect("Failed to restore permissions");

    if !enforced {
        return;
    }
    assert!(!success, "listing the root itself is fatal");
    assert!(stderr.contains("dirprint:"), "stderr: {}", stderr);
}

// ============================================================================
// Filename Edge Cases
// ============================================================================

#[test]
fn test_filename_with_spaces() {
    let dir = TestDir::new();
    dir.add_file("file with spaces.txt", "data");
    dir.add_file("dir with spaces/nested.txt", "data");

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "-r"]);
    assert!(success);
    assert!(stdout.contains("file with spaces.txt"));
    assert!(stdout.contains("dir with spaces"));
    assert!(stdout.contains("nested.txt"));
}

#[test]
fn test_filename_with_unicode() {
    let dir = TestDir::new();
    dir.add_file("日本語.txt", "data");
    dir.add_file("émoji_🎉.md", "data");
    dir.add_file("中文目录/文件.txt", "data");

    let (stdout, _stderr, success) =
        run_dirprint(dir.path(), &[".", "print", "-r", "--type", "--extension"]);
    assert!(success, "dirprint should handle unicode filenames");
    assert!(stdout.contains("日本語.txt"));
    assert!(stdout.contains("文件.txt"));
    assert_eq!(columns_of(&stdout, "émoji_🎉.md"), vec!["émoji_🎉.md", "File", "md"]);

    // widths are counted in characters
    let type_columns: Vec<usize> = listing_lines(&stdout)
        .iter()
        .map(|l| {
            let byte = l.find("File").or_else(|| l.find("Directory")).unwrap();
            l[..byte].chars().count()
        })
        .collect();
    assert!(type_columns.windows(2).all(|w| w[0] == w[1]), "{}", stdout);
}

#[test]
fn test_extension_edge_cases() {
    let dir = TestDir::new();
    dir.add_file("archive.tar.gz", "data");
    dir.add_file(".bashrc", "data");
    dir.add_file("Makefile", "data");

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "--extension"]);
    assert!(success);
    assert_eq!(columns_of(&stdout, "archive.tar.gz"), vec!["archive.tar.gz", "gz"]);
    assert_eq!(columns_of(&stdout, ".bashrc"), vec![".bashrc", "bashrc"]);
    assert_eq!(columns_of(&stdout, "Makefile"), vec!["Makefile"]);
}

#[test]
fn test_glob_special_characters_are_literal() {
    let dir = TestDir::new();
    dir.add_file("a+b.txt", "data");
    dir.add_file("aab.txt", "data");
    dir.add_file("[x].log", "data");

    let (stdout, _stderr, success) =
        run_dirprint(dir.path(), &[".", "print", "-e", "a+b.*,[x].log"]);
    assert!(success);
    assert!(!stdout.contains("a+b.txt"));
    assert!(!stdout.contains("[x].log"));
    assert!(stdout.contains("aab.txt"));
}

// ============================================================================
// Structure Edge Cases
// ============================================================================

#[test]
fn test_empty_directory() {
    let dir = TestDir::new();
    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "-r", "--size"]);
    assert!(success);
    let lines = listing_lines(&stdout);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("    0"));
    assert!(stdout.contains("0 directories, 0 files, 0 links"));
}

#[test]
fn test_deep_nesting() {
    let dir = TestDir::new();
    let depth = 40;
    let nested: String = (0..depth).map(|i| format!("d{}/", i)).collect();
    dir.add_file(&format!("{}leaf.txt", nested), "x");

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "-r", "--size"]);
    assert!(success, "dirprint should handle deep nesting");
    let lines = listing_lines(&stdout);
    assert_eq!(lines.len(), depth + 2);
    let leaf = lines.last().unwrap();
    let indent = leaf.len() - leaf.trim_start().len();
    assert_eq!(indent, 4 * (depth + 1));
    assert!(leaf.trim_start().starts_with("leaf.txt"));
    assert!(lines[0].ends_with("    1"), "root size: {}", lines[0]);
}

#[test]
fn test_non_recursive_ignores_nested_content() {
    let dir = TestDir::new();
    dir.populate(4, 3);

    let (stdout, _stderr, success) = run_dirprint(dir.path(), &[".", "print", "--size"]);
    assert!(success);
    assert_eq!(listing_lines(&stdout).len(), 1 + 3 + 1);
    assert!(stdout.contains("1 directories, 3 files, 0 links"));
    assert_eq!(columns_of(&stdout, "level_0"), vec!["level_0", "0"]);
}
