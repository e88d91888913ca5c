pub mod arrow;
pub mod tenors;

pub use self::arrow::{build_arrow_schema, to_record_batch};
pub use tenors::{check_headers, HeaderDrift};
