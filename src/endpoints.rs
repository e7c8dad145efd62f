//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/budgets/{budget_id}', use [format_endpoint].

/// The route for registering a new account.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";
/// The route for checking that a bearer token is still valid.
pub const AUTH_PROFILE: &str = "/api/auth/profile";

/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to update or delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to fetch, update, or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list budgets and upsert a budget.
pub const BUDGETS: &str = "/api/budgets";
/// The route to delete a single budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";

/// The route for the all-time income/expense/balance summary.
pub const SUMMARY: &str = "/api/summary";
/// The route for the summary filtered to one calendar month.
pub const MONTHLY_SUMMARY: &str = "/api/summary/monthly";
/// The route for per-category spending totals.
pub const BREAKDOWN: &str = "/api/reports/breakdown";
/// The route for per-category totals filtered to one calendar month.
pub const MONTHLY_BREAKDOWN: &str = "/api/reports/breakdown/monthly";

/// The route to read and update the caller's profile.
pub const USER_PROFILE: &str = "/api/users/profile";
/// The route to change the caller's password.
pub const USER_PASSWORD: &str = "/api/users/password";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/budgets/{budget_id}', '{budget_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
