mod errors;
mod lending_service;

pub use errors::{ErrorKind, LendingError, Result};
pub use lending_service::{
    BORROW_SUCCESS_MESSAGE, LendingPolicy, RETURN_SUCCESS_MESSAGE, ServiceDependencies, add_book,
    add_member, borrow_book, calculate_fine, calculate_fine_at, get_available_books,
    get_member_loans, return_book,
};
