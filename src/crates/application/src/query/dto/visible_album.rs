use domain::album::Album;
use domain::value::UserId;

/// An album as listed to one user. Built on each request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleAlbum {
    pub album: Album,
    pub media_count: i32,
    /// Users the album is shared with; only filled for albums owned by the current user.
    pub visitors: Vec<UserId>,
    pub owned_by_current_user: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAlbumsFilter {
    /// Skip albums shared with the user.
    pub only_directly_owned: bool,
}
