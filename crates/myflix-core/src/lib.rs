pub mod catalogue;
pub mod favourites;
pub mod session;

pub use catalogue::{find_by_id, find_by_title, CatalogueCache};
pub use favourites::{FavouritesReconciler, ToggleAction};
pub use session::Session;
