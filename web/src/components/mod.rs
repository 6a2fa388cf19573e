mod auth;
mod header;
mod loading_spinner;
mod task_form;
mod task_list;
pub mod toast;

pub use auth::AuthGate;
pub use header::Header;
pub use loading_spinner::LoadingSpinner;
pub use task_form::TaskComposer;
pub use task_list::TaskBoard;
pub use toast::Toaster;
