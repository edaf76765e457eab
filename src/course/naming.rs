//! File and directory names for the generated script tree.
//!
//! ```text
//! <root>/
//!   000_course_intro.txt
//!   01_<Module>/00_intro.txt
//!   01_<Module>/01_<Lecture>.txt
//!   01_<Module>/99_conclusion.txt
//!   zzz_course_conclusion.txt
//!   course_manifest.json
//! ```
//!
//! The prefixes make a plain lexicographic listing match playback order.

/// Longest sanitized name, in characters.
pub const MAX_NAME_LEN: usize = 100;

pub const COURSE_INTRO_FILE: &str = "000_course_intro.txt";
pub const COURSE_CONCLUSION_FILE: &str = "zzz_course_conclusion.txt";
pub const MODULE_INTRO_FILE: &str = "00_intro.txt";
pub const MODULE_CONCLUSION_FILE: &str = "99_conclusion.txt";
pub const MANIFEST_FILE: &str = "course_manifest.json";

/// Reduce `name` to a portable file-name fragment.
///
/// Keeps alphanumerics (any script), `_`, `-` and spaces; trims, turns
/// spaces into `_` and truncates to [`MAX_NAME_LEN`] characters.
/// Idempotent.
///
/// ```
/// use lecture_writer::course::sanitize;
///
/// assert_eq!(sanitize(" What is Rust? (Part 1) "), "What_is_Rust_Part_1");
/// assert_eq!(sanitize(&sanitize("a/b: c")), sanitize("a/b: c"));
/// ```
pub fn sanitize(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();

    kept.trim_matches(' ')
        .replace(' ', "_")
        .chars()
        .take(MAX_NAME_LEN)
        .collect()
}

/// `NN_<sanitized>` for the module at 0-based `position`.
pub fn module_dir_name(position: usize, module_name: &str) -> String {
    format!("{:02}_{}", position + 1, sanitize(module_name))
}

/// `NN_<sanitized>.txt` for the lecture at 0-based `position`.
pub fn lecture_file_name(position: usize, title: &str) -> String {
    format!("{:02}_{}.txt", position + 1, sanitize(title))
}
