#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// The requested year the page was fetched for.
    pub year: i32,
    /// Cleaned text of every `th` in the table, in document order.
    pub headers: Vec<String>,
    /// Each data row as raw `td` text, before sentinel handling.
    pub rows: Vec<Vec<String>>,
}
