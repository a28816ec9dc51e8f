use crate::value::AlbumId;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    /// 相册起始时间（包含）
    pub start: NaiveDateTime,
    /// 相册结束时间（不包含）
    pub end: NaiveDateTime,
    /// Total as stored by the catalog; may lag behind the albums view.
    pub total_count: i32,
}

impl Album {
    pub fn new(id: AlbumId, name: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Album {
            id,
            name: name.into(),
            start,
            end,
            total_count: 0,
        }
    }
}
