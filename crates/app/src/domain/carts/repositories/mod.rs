//! Cart Repositories

mod items;
mod wishlist;

pub(crate) use items::PgCartItemsRepository;
pub(crate) use wishlist::PgWishlistRepository;
