/// Extension-based file categorization.
///
/// This module provides the category table that maps file extensions to
/// named categories (e.g., "Images", "Documents"). The table preserves the
/// order its entries were supplied in, and resolution is first-match: when
/// an extension appears under more than one category, the earliest category
/// wins.
///
/// # Examples
///
/// ```
/// use sweepdir::category::{CategoryTable, OTHERS_CATEGORY};
///
/// let table = CategoryTable::default();
/// assert_eq!(table.resolve(".pdf"), "Documents");
/// assert_eq!(table.resolve(".JPG"), "Images");
/// assert_eq!(table.resolve(".xyz"), OTHERS_CATEGORY);
/// ```
/// Fallback category for files whose extension matches no table entry,
/// including files with no extension at all. It never needs to appear in
/// the table itself.
pub const OTHERS_CATEGORY: &str = "Others";

/// One named category and the extensions it owns.
///
/// Extensions are stored lowercase and include the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// The category name, used as the destination folder name.
    pub name: String,
    /// The extensions belonging to this category (lowercase, with dot).
    pub extensions: Vec<String>,
}

/// An ordered mapping from category names to extension sets.
///
/// Order matters: `resolve` scans entries front to back and returns the
/// first category whose extension set contains the lookup key, so the
/// caller-supplied ordering determines how shared extensions are broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<CategoryEntry>,
}

impl CategoryTable {
    /// Creates a table from `(name, extensions)` pairs, preserving order.
    ///
    /// Extensions are normalized to lowercase; names and extensions are
    /// assumed to be pre-validated (see `config::load_categories`).
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, extensions)| CategoryEntry {
                name,
                extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Resolves a file extension to its owning category name.
    ///
    /// The comparison is case-insensitive and the table is scanned in its
    /// defined order; the first match wins. Unmatched extensions, including
    /// the empty string, resolve to [`OTHERS_CATEGORY`]. Total on all
    /// inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepdir::category::CategoryTable;
    ///
    /// let table = CategoryTable::default();
    /// assert_eq!(table.resolve(".py"), "Code");
    /// assert_eq!(table.resolve(""), "Others");
    /// ```
    pub fn resolve(&self, extension: &str) -> &str {
        let extension = extension.to_lowercase();
        for entry in &self.entries {
            if entry.extensions.iter().any(|e| *e == extension) {
                return &entry.name;
            }
        }
        OTHERS_CATEGORY
    }

    /// Returns true if `name` is a category this table can route files to,
    /// including the [`OTHERS_CATEGORY`] sentinel.
    pub fn is_known_category(&self, name: &str) -> bool {
        name == OTHERS_CATEGORY || self.entries.iter().any(|entry| entry.name == name)
    }

    /// Iterates the table entries in their defined order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.iter()
    }

    /// Number of categories in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryTable {
    /// The built-in table: Images, Documents, Videos, Audio, Archives,
    /// Code, Executables, Data.
    fn default() -> Self {
        let owned = |names: &[&str]| -> Vec<String> {
            names.iter().map(|n| (*n).to_string()).collect()
        };

        Self::new(vec![
            (
                "Images".to_string(),
                owned(&[
                    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico", ".tiff",
                ]),
            ),
            (
                "Documents".to_string(),
                owned(&[
                    ".pdf", ".doc", ".docx", ".txt", ".xlsx", ".xls", ".ppt", ".pptx", ".odt",
                ]),
            ),
            (
                "Videos".to_string(),
                owned(&[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v"]),
            ),
            (
                "Audio".to_string(),
                owned(&[".mp3", ".wav", ".aac", ".flac", ".wma", ".ogg", ".m4a", ".opus"]),
            ),
            (
                "Archives".to_string(),
                owned(&[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz", ".iso"]),
            ),
            (
                "Code".to_string(),
                owned(&[
                    ".py", ".js", ".ts", ".java", ".cpp", ".c", ".h", ".cs", ".rb", ".php",
                    ".go", ".rs", ".html", ".css", ".json", ".xml", ".yaml", ".yml", ".sh",
                    ".bat", ".ps1",
                ]),
            ),
            (
                "Executables".to_string(),
                owned(&[".exe", ".msi", ".app", ".bin", ".com", ".run", ".deb", ".rpm"]),
            ),
            (
                "Data".to_string(),
                owned(&[".csv", ".sql", ".db", ".sqlite", ".json", ".xml", ".yaml"]),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_categories() {
        let table = CategoryTable::default();
        assert_eq!(table.resolve(".pdf"), "Documents");
        assert_eq!(table.resolve(".jpg"), "Images");
        assert_eq!(table.resolve(".py"), "Code");
        assert_eq!(table.resolve(".mp4"), "Videos");
        assert_eq!(table.resolve(".mp3"), "Audio");
        assert_eq!(table.resolve(".zip"), "Archives");
        assert_eq!(table.resolve(".exe"), "Executables");
        assert_eq!(table.resolve(".csv"), "Data");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let table = CategoryTable::default();
        assert_eq!(table.resolve(".PDF"), "Documents");
        assert_eq!(table.resolve(".JpG"), "Images");
    }

    #[test]
    fn test_resolve_unmatched_returns_others() {
        let table = CategoryTable::default();
        assert_eq!(table.resolve(".xyz"), OTHERS_CATEGORY);
        assert_eq!(table.resolve(""), OTHERS_CATEGORY);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        // .json belongs to both Code and Data in the default table; Code
        // comes first.
        let table = CategoryTable::default();
        assert_eq!(table.resolve(".json"), "Code");
        assert_eq!(table.resolve(".xml"), "Code");
        assert_eq!(table.resolve(".yaml"), "Code");
    }

    #[test]
    fn test_resolve_respects_caller_order() {
        let table = CategoryTable::new(vec![
            ("Data".to_string(), vec![".json".to_string()]),
            ("Code".to_string(), vec![".json".to_string(), ".rs".to_string()]),
        ]);
        assert_eq!(table.resolve(".json"), "Data");
        assert_eq!(table.resolve(".rs"), "Code");
    }

    #[test]
    fn test_new_lowercases_extensions() {
        let table = CategoryTable::new(vec![(
            "Images".to_string(),
            vec![".PNG".to_string()],
        )]);
        assert_eq!(table.resolve(".png"), "Images");
        assert_eq!(table.resolve(".PNG"), "Images");
    }

    #[test]
    fn test_is_known_category() {
        let table = CategoryTable::default();
        assert!(table.is_known_category("Images"));
        assert!(table.is_known_category(OTHERS_CATEGORY));
        assert!(!table.is_known_category("Fonts"));
    }

    #[test]
    fn test_default_table_has_eight_categories() {
        let table = CategoryTable::default();
        assert_eq!(table.len(), 8);
        let names: Vec<_> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Images",
                "Documents",
                "Videos",
                "Audio",
                "Archives",
                "Code",
                "Executables",
                "Data"
            ]
        );
    }
}
