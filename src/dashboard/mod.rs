pub mod notify;
pub mod state;
pub mod storage;
pub mod view;

pub use notify::{Level, Notification};
pub use state::{Completion, Dashboard, FetchKind, FetchTicket};
pub use storage::{FileStore, MemoryStore, WatchlistStore, WATCHLIST_KEY};
pub use view::{derive_view, CoinCard, DashboardView, LoadMore};
