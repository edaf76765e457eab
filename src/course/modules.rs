//! Grouping lecture records into ordered modules, and the title-only course
//! outline the intro/conclusion prompts summarise.

use std::collections::HashMap;

use super::dataset::LectureRecord;

// ---------------------------------------------------------------------------
// ModuleGroup
// ---------------------------------------------------------------------------

/// Lectures sharing a module name, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleGroup {
    pub name: String,
    pub lectures: Vec<LectureRecord>,
}

/// Neighbouring lecture titles within a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureLinks {
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl ModuleGroup {
    /// Previous/next titles for each lecture, by position.
    ///
    /// Positions are used rather than titles so two lectures with the same
    /// title still get their own neighbours.
    pub fn links(&self) -> Vec<LectureLinks> {
        let titles: Vec<&str> = self.lectures.iter().map(|l| l.title.as_str()).collect();
        (0..titles.len())
            .map(|i| LectureLinks {
                previous: i.checked_sub(1).map(|p| titles[p].to_string()),
                next: titles.get(i + 1).map(|t| (*t).to_string()),
            })
            .collect()
    }

    pub fn outline(&self) -> ModuleOutline {
        ModuleOutline {
            name: self.name.clone(),
            lectures: self.lectures.iter().map(|l| l.title.clone()).collect(),
        }
    }
}

/// Group records by module name.
///
/// Modules appear in order of first appearance; a module's lectures keep
/// dataset order even when they are not contiguous.  Records without a
/// module name are skipped.
pub fn group_modules(records: &[LectureRecord]) -> Vec<ModuleGroup> {
    let mut groups: Vec<ModuleGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Some(module) = record.module.as_deref() else {
            log::warn!("skipping lecture '{}': no module name", record.title);
            continue;
        };

        let slot = *index.entry(module).or_insert_with(|| {
            groups.push(ModuleGroup {
                name: module.to_string(),
                lectures: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].lectures.push(record.clone());
    }

    groups
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

/// A module reduced to its lecture titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutline {
    pub name: String,
    pub lectures: Vec<String>,
}

impl ModuleOutline {
    /// ```text
    /// Module: Memory
    ///   1. Ownership
    ///   2. Borrowing
    /// ```
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Module: {}", self.name)];
        for (i, title) in self.lectures.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, title));
        }
        lines.join("\n")
    }
}

/// The whole course reduced to module and lecture titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOutline {
    pub title: String,
    pub modules: Vec<ModuleOutline>,
}

impl CourseOutline {
    pub fn from_groups(title: impl Into<String>, groups: &[ModuleGroup]) -> Self {
        Self {
            title: title.into(),
            modules: groups.iter().map(ModuleGroup::outline).collect(),
        }
    }

    /// ```text
    /// Course Overview:
    /// 1. Memory
    ///     1. Ownership
    /// ```
    pub fn summary(&self) -> String {
        let mut lines = vec!["Course Overview:".to_string()];
        for (m, module) in self.modules.iter().enumerate() {
            lines.push(format!("{}. {}", m + 1, module.name));
            for (i, title) in module.lectures.iter().enumerate() {
                lines.push(format!("    {}. {}", i + 1, title));
            }
        }
        lines.join("\n")
    }
}
