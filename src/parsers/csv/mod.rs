mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::CsvRecord;
    pub use super::parser::CsvParser;
    pub use super::types::CsvSign;
}
