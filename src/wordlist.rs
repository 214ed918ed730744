use std::path::{Path, PathBuf};

use crate::error::{BruteError, Result};

pub const DEFAULT_DIR: &str = "assets";
pub const DEFAULT_FILE: &str = "fuzz.txt";

/// Read `dir/filename`, one candidate per line. Blank lines are skipped.
pub fn load_wordlist(dir: &Path, filename: &str) -> Result<Vec<String>> {
    let path: PathBuf = dir.join(filename);
    let data = std::fs::read_to_string(&path)
        .map_err(|source| BruteError::Wordlist { path: path.clone(), source })?;
    let words: Vec<String> = parse_wordlist(&data);
    tracing::debug!(path=%path.display(), count = words.len(), "loaded word list");
    Ok(words)
}

pub fn parse_wordlist(data: &str) -> Vec<String> {
    data.lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// First `limit` entries in their original order. A missing, zero or negative
/// limit selects everything.
pub fn select_candidates(words: &[String], limit: Option<i64>) -> Vec<String> {
    match limit {
        Some(l) if l > 0 => {
            let n = usize::try_from(l).unwrap_or(usize::MAX).min(words.len());
            words[..n].to_vec()
        }
        _ => words.to_vec(),
    }
}

/// Load and truncate in one step.
pub fn load_candidates(dir: &Path, filename: &str, limit: Option<i64>) -> Result<Vec<String>> {
    let words = load_wordlist(dir, filename)?;
    Ok(select_candidates(&words, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{i}")).collect()
    }

    #[test]
    fn limit_truncates_in_order() {
        let list = words(10);
        let picked = select_candidates(&list, Some(3));
        assert_eq!(picked, vec!["w0", "w1", "w2"]);
        assert_eq!(list.len(), 10);
    }

    #[test]
    fn absent_zero_or_negative_limit_selects_all() {
        let list = words(5);
        assert_eq!(select_candidates(&list, None).len(), 5);
        assert_eq!(select_candidates(&list, Some(0)).len(), 5);
        assert_eq!(select_candidates(&list, Some(-2)).len(), 5);
        assert_eq!(select_candidates(&list, Some(50)).len(), 5);
    }

    #[test]
    fn loads_lines_and_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("fuzz.txt")).unwrap();
        write!(f, "admin\r\n\nconfig.php\n.git/HEAD\n").unwrap();

        let loaded = load_wordlist(dir.path(), "fuzz.txt").unwrap();
        assert_eq!(loaded, vec!["admin", "config.php", ".git/HEAD"]);
    }

    #[test]
    fn empty_file_yields_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.txt"), "").unwrap();
        assert!(load_candidates(dir.path(), "empty.txt", None).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_wordlist(dir.path(), "nope.txt").unwrap_err();
        assert!(matches!(err, BruteError::Wordlist { .. }));
        assert!(err.is_configuration());
    }
}
