pub mod country;
pub mod slug;
