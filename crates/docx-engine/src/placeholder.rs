//! Header/footer placeholder expansion
//!
//! Recognized tokens are `{date}`, `{time}` and `{reportName}`. Each token is
//! replaced at its first occurrence only; later occurrences stay literal.

pub const DATE_TOKEN: &str = "{date}";
pub const TIME_TOKEN: &str = "{time}";
pub const REPORT_NAME_TOKEN: &str = "{reportName}";

/// Values substituted into a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderContext {
    pub date: String,
    pub time: String,
    pub report_name: String,
}

/// Expand the first occurrence of each token, in date, time, name order
pub fn expand(template: &str, context: &PlaceholderContext) -> String {
    template
        .replacen(DATE_TOKEN, &context.date, 1)
        .replacen(TIME_TOKEN, &context.time, 1)
        .replacen(REPORT_NAME_TOKEN, &context.report_name, 1)
}
