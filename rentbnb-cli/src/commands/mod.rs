//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `cabin`: Add, edit, remove, list and show cabins
//! - `book`: Book a cabin for a guest
//! - `quote`: Price a stay without booking
//! - `available`: Exit 0 if a cabin is free for a stay, 1 if not
//! - `check_in` / `check_out`: Operator lifecycle steps
//! - `cancel`: Cancel as the owning guest or as operator
//! - `review`: Review a checked-out stay
//! - `list` / `show`: Inspect reservations
//! - `reviews`: List a cabin's reviews
//! - `delete`: Remove a reservation and its review
//! - `completions`: Generate shell completion scripts

pub mod available;
pub mod book;
pub mod cabin;
pub mod cancel;
pub mod check_in;
pub mod check_out;
pub mod completions;
pub mod delete;
pub mod init;
pub mod list;
pub mod quote;
pub mod review;
pub mod reviews;
pub mod show;

pub use available::AvailableCommand;
pub use book::BookCommand;
pub use cabin::CabinCommand;
pub use cancel::CancelCommand;
pub use check_in::CheckInCommand;
pub use check_out::CheckOutCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use quote::QuoteCommand;
pub use review::ReviewCommand;
pub use reviews::ReviewsCommand;
pub use show::ShowCommand;
