mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::{Mt940Details, Mt940Transaction};
    pub use super::parser::Mt940Parser;
    pub use super::types::FundsCode;
}
