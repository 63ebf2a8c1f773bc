pub mod notifier;
pub mod stdout;
pub mod telegram;

pub use notifier::{Notifier, NotifyError};
pub use stdout::StdoutNotifier;
pub use telegram::TelegramNotifier;
