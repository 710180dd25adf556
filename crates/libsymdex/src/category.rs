//! Symbol categories, one per Doxygen search table.

use bitflags::bitflags;

bitflags! {
    /// Categories a symbol can belong to. Search options carry a set of these as a filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymbolCategory: u32 {
        /// Uncategorized symbols: plain payloads and Doxygen's combined tables.
        const SYMBOLS = 1 << 0;
        /// Classes and structs.
        const CLASSES = 1 << 1;
        /// Namespaces.
        const NAMESPACES = 1 << 2;
        /// Source files.
        const FILES = 1 << 3;
        /// Functions and methods.
        const FUNCTIONS = 1 << 4;
        /// Variables and members.
        const VARIABLES = 1 << 5;
        /// Typedefs.
        const TYPEDEFS = 1 << 6;
        /// Enumerations.
        const ENUMS = 1 << 7;
        /// Enumerators.
        const ENUMVALUES = 1 << 8;
        /// Related (friend) symbols.
        const RELATED = 1 << 9;
        /// Preprocessor macros.
        const DEFINES = 1 << 10;
        /// Documentation groups.
        const GROUPS = 1 << 11;
        /// Free-standing pages.
        const PAGES = 1 << 12;
        /// C++ concepts.
        const CONCEPTS = 1 << 13;
    }
}

impl Default for SymbolCategory {
    fn default() -> Self {
        Self::all()
    }
}

/// Table names and display labels in flag order.
const NAMES: &[(SymbolCategory, &str, &str)] = &[
    (SymbolCategory::SYMBOLS, "all", "symbol"),
    (SymbolCategory::CLASSES, "classes", "class"),
    (SymbolCategory::NAMESPACES, "namespaces", "namespace"),
    (SymbolCategory::FILES, "files", "file"),
    (SymbolCategory::FUNCTIONS, "functions", "function"),
    (SymbolCategory::VARIABLES, "variables", "variable"),
    (SymbolCategory::TYPEDEFS, "typedefs", "typedef"),
    (SymbolCategory::ENUMS, "enums", "enum"),
    (SymbolCategory::ENUMVALUES, "enumvalues", "enum value"),
    (SymbolCategory::RELATED, "related", "related"),
    (SymbolCategory::DEFINES, "defines", "define"),
    (SymbolCategory::GROUPS, "groups", "group"),
    (SymbolCategory::PAGES, "pages", "page"),
    (SymbolCategory::CONCEPTS, "concepts", "concept"),
];

impl SymbolCategory {
    /// Resolve a Doxygen table name such as `functions` to its category.
    pub fn from_table_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(_, table, _)| table.eq_ignore_ascii_case(name))
            .map(|(category, _, _)| *category)
    }

    /// Human-friendly label for a single category flag.
    ///
    /// Combined sets are described by [`describe_categories`].
    pub fn label(self) -> &'static str {
        NAMES
            .iter()
            .find(|(category, _, _)| *category == self)
            .map_or("mixed", |(_, _, label)| *label)
    }

    /// Parse a comma separated list of table names (`functions,classes`).
    ///
    /// Unknown names yield `None`; an empty list yields every category.
    pub fn parse_list(list: &str) -> Option<Self> {
        let mut categories = Self::empty();
        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            categories |= Self::from_table_name(name)?;
        }
        if categories.is_empty() {
            Some(Self::all())
        } else {
            Some(categories)
        }
    }
}

/// Format a set of categories into their labels, in flag order.
pub fn describe_categories(categories: SymbolCategory) -> Vec<&'static str> {
    NAMES
        .iter()
        .filter(|(category, _, _)| categories.contains(*category))
        .map(|(_, _, label)| *label)
        .collect()
}
