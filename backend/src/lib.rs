pub mod types;
pub mod logger;
pub mod books;
pub mod usfm;
pub mod convert;

pub mod db;

use std::path::Path;

pub static USFM_EXTENSION: &'static str = "usfm";
pub static BBLX_EXTENSION: &'static str = "bblx";

/// The output module must carry the e-Sword extension, otherwise e-Sword
/// will not list it as an installable Bible.
pub fn has_bblx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(BBLX_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bblx_extension_check() {
        assert!(has_bblx_extension(&PathBuf::from("out/module.bblx")));
        assert!(has_bblx_extension(&PathBuf::from("module.BBLX")));
        assert!(!has_bblx_extension(&PathBuf::from("module.sqlite3")));
        assert!(!has_bblx_extension(&PathBuf::from("module")));
    }
}
