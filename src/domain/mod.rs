pub mod book;
pub mod commands;
pub mod fine;
pub mod loan;
pub mod member;
pub mod value_objects;

pub use book::Book;
pub use fine::{DailyRateFine, FinePolicy, FineStrategy};
pub use loan::Loan;
pub use member::Member;
pub use value_objects::*;
