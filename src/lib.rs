//! Grocery list organizer: upload a photo of a grocery list, get it back
//! sorted from most to least fragile by a vision-capable language model.

pub mod client;
pub mod config;
pub mod error;
pub mod grocery;
pub mod handler;
pub mod page;
pub mod prompt;
pub mod provider;
pub mod server;
pub mod session;
pub mod upload;

pub use config::Settings;
pub use grocery::{extract_grocery_list, ExtractError, GroceryList};
pub use handler::AppState;
pub use prompt::{PromptProfile, ResultView};
pub use server::router;
pub use session::{SelectedFile, UploadSession};
