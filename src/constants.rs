// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_DATA_PATH: &str = "data";

// Query limits and defaults
pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const MAX_LIST_LIMIT: u32 = 100;

// Validation limits
pub const MAX_CATEGORY_LENGTH: usize = 15;
pub const MAX_COMMENT_LENGTH: usize = 50;
pub const MAX_CATEGORY_FILTER_LENGTH: usize = 20;
pub const MAX_AMOUNT: f64 = 100_000.0;

// Categories rejected at creation regardless of shape
pub const FORBIDDEN_CATEGORY: &str = "forbidden";

// Error messages
pub const ERR_DATABASE_OPERATION: &str = "Database operation failed";
pub const ERR_EXPENSE_NOT_FOUND: &str = "Expense not found";
pub const ERR_NO_UPDATE_FIELDS: &str = "No fields to update";
pub const ERR_FORBIDDEN_CATEGORY: &str = "Category is forbidden";
