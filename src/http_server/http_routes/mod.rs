pub mod auth;
pub mod playlists;
