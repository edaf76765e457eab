//! Course data: input records, module grouping, naming rules and the output
//! tree.

pub mod dataset;
pub mod layout;
pub mod manifest;
pub mod modules;
pub mod naming;

pub use dataset::{
    load_course_info, load_lectures, load_style_sample, CourseInfo, DatasetError, LectureRecord,
};
pub use layout::{LayoutError, OutputLayout};
pub use manifest::{CourseManifest, ManifestLecture, ManifestModule};
pub use modules::{group_modules, CourseOutline, LectureLinks, ModuleGroup, ModuleOutline};
pub use naming::{lecture_file_name, module_dir_name, sanitize};
