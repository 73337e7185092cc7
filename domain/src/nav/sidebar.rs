//! Sidebar navigation entries

use serde::Serialize;

/// A single sidebar link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub name: &'static str,
    pub href: &'static str,
}

impl NavEntry {
    pub const fn new(name: &'static str, href: &'static str) -> Self {
        Self { name, href }
    }

    /// An entry is highlighted only when the current path is exactly its href
    pub fn is_active(&self, pathname: &str) -> bool {
        self.href == pathname
    }
}

/// An entry paired with its highlight state for a given path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub entry: NavEntry,
    pub active: bool,
}

const INSTITUTION_ADMIN_ENTRIES: [NavEntry; 3] = [
    NavEntry::new("Verification", "/institution-admin/verification"),
    NavEntry::new(
        "Upload Placement Data",
        "/institution-admin/upload-placement-data",
    ),
    NavEntry::new("Profile", "/institution-admin/profile"),
];

/// Ordered, static list of navigation entries
#[derive(Debug, Clone, Copy)]
pub struct Sidebar {
    entries: &'static [NavEntry],
}

impl Sidebar {
    /// Sidebar of the institution-admin area
    pub const fn institution_admin() -> Self {
        Self {
            entries: &INSTITUTION_ADMIN_ENTRIES,
        }
    }

    pub fn entries(&self) -> &'static [NavEntry] {
        self.entries
    }

    /// All entries in order, each marked active or not for `pathname`
    pub fn items(&self, pathname: &str) -> Vec<NavItem> {
        self.entries
            .iter()
            .map(|entry| NavItem {
                entry: *entry,
                active: entry.is_active(pathname),
            })
            .collect()
    }

    /// The entry whose href matches `pathname`, if any
    pub fn active(&self, pathname: &str) -> Option<&'static NavEntry> {
        self.entries.iter().find(|entry| entry.is_active(pathname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_institution_admin_entries() {
        let sidebar = Sidebar::institution_admin();
        let names: Vec<_> = sidebar.entries().iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Verification", "Upload Placement Data", "Profile"]);
    }

    #[test]
    fn test_exactly_one_active_on_match() {
        let items = Sidebar::institution_admin().items("/institution-admin/profile");
        let active: Vec<_> = items.iter().filter(|i| i.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].entry.name, "Profile");
    }

    #[test]
    fn test_prefix_does_not_match() {
        let sidebar = Sidebar::institution_admin();
        assert!(sidebar.active("/institution-admin").is_none());
        assert!(sidebar.active("/institution-admin/profile/edit").is_none());
        assert!(sidebar.items("/").iter().all(|i| !i.active));
    }

    #[test]
    fn test_active_lookup() {
        let entry = Sidebar::institution_admin()
            .active("/institution-admin/upload-placement-data")
            .unwrap();
        assert_eq!(entry.name, "Upload Placement Data");
    }
}
