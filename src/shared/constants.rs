/// Default page number for member listings
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size for member listings
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// =============================================================================
// CATEGORY TREE PRESENTATION
// =============================================================================

/// Horizontal indent, in pixels, per category depth level in the list table
pub const CATEGORY_INDENT_UNIT_PX: u32 = 24;

/// Marker repeated once per traversal level in parent selector labels
pub const PARENT_OPTION_MARKER: char = '-';

/// Label of the leading "no parent" choice in the parent selector
pub const ROOT_OPTION_LABEL: &str = "(최상위 카테고리)";

/// Max length of a category name
pub const CATEGORY_NAME_MAX_LEN: u64 = 50;

// =============================================================================
// MEMBER RULES
// =============================================================================

/// Minimum password length accepted on member create/update
pub const MEMBER_PASSWORD_MIN_LEN: u64 = 6;

// =============================================================================
// SCREEN ROUTES
// =============================================================================

pub const CATEGORY_LIST_ROUTE: &str = "/admin/categories";
pub const MEMBER_LIST_ROUTE: &str = "/admin/members";
