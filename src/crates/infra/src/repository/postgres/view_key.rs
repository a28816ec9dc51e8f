//! Key layout of the `albums_view` table.
//!
//! Partition key: `USER#<userId>#ALBUMS_VIEW`
//! Sort key: `OWNED#<owner>#<folderName>#COUNT` or `VISITOR#<owner>#<folderName>#COUNT`
//!
//! The owner segment never contains `#`; the folder name may. The album itself is
//! read back from the `album_owner` / `album_folder_name` columns, the sort key only
//! tells the availability kind.

use domain::value::{AlbumId, Availability, Owner, UserId};

const USER_PREFIX: &str = "USER#";
const ALBUMS_VIEW_SUFFIX: &str = "#ALBUMS_VIEW";
const OWNED: &str = "OWNED";
const VISITOR: &str = "VISITOR";
const COUNT_SUFFIX: &str = "#COUNT";

pub fn partition_key(user_id: &UserId) -> String {
    format!("{}{}{}", USER_PREFIX, user_id, ALBUMS_VIEW_SUFFIX)
}

pub fn sort_key(album_id: &AlbumId, as_owner: bool) -> String {
    format!(
        "{}#{}#{}{}",
        kind(as_owner),
        album_id.owner,
        album_id.folder_name,
        COUNT_SUFFIX
    )
}

/// Both keys of the row storing `album_id` for `availability`.
pub fn row_key(availability: &Availability, album_id: &AlbumId) -> (String, String) {
    (
        partition_key(&availability.user_id),
        sort_key(album_id, availability.as_owner),
    )
}

/// Sort key prefixes selecting every album of `owner`, owned and visited.
pub fn owner_prefixes(owner: &Owner) -> [String; 2] {
    [
        format!("{}#{}#", OWNED, owner),
        format!("{}#{}#", VISITOR, owner),
    ]
}

pub fn parse_partition_key(pk: &str) -> Option<UserId> {
    let user_id = pk.strip_prefix(USER_PREFIX)?.strip_suffix(ALBUMS_VIEW_SUFFIX)?;
    if user_id.is_empty() {
        return None;
    }
    Some(UserId::from(user_id))
}

/// Whether the row was stored as owner, from the sort key's kind segment.
pub fn parse_kind(sk: &str) -> Option<bool> {
    if !sk.ends_with(COUNT_SUFFIX) {
        return None;
    }
    match sk.split_once('#')?.0 {
        OWNED => Some(true),
        VISITOR => Some(false),
        _ => None,
    }
}

fn kind(as_owner: bool) -> &'static str {
    if as_owner {
        OWNED
    } else {
        VISITOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_layout() {
        let (pk, sk) = row_key(
            &Availability::visitor("pepper"),
            &AlbumId::new("ironman", "2024-avengers"),
        );

        assert_eq!(pk, "USER#pepper#ALBUMS_VIEW");
        assert_eq!(sk, "VISITOR#ironman#2024-avengers#COUNT");
    }

    #[test]
    fn test_keys_parse_back() {
        let album_id = AlbumId::new("ironman", "trips#2024");

        assert_eq!(parse_kind(&sort_key(&album_id, true)), Some(true));
        assert_eq!(parse_kind(&sort_key(&album_id, false)), Some(false));
        assert_eq!(
            parse_partition_key(&partition_key(&UserId::from("tony"))),
            Some(UserId::from("tony"))
        );
    }

    #[test]
    fn test_malformed_keys_are_rejected() {
        assert_eq!(parse_partition_key("USER##ALBUMS_VIEW"), None);
        assert_eq!(parse_partition_key("ALBUM#tony"), None);
        assert_eq!(parse_kind("OWNER#ironman#a#COUNT"), None);
        assert_eq!(parse_kind("OWNED#ironman#a"), None);
        assert_eq!(parse_kind("OWNED"), None);
    }

    #[test]
    fn test_owner_prefixes_do_not_match_longer_owner() {
        let sk = sort_key(&AlbumId::new("ironman2", "a"), true);

        assert!(owner_prefixes(&Owner::from("ironman"))
            .iter()
            .all(|prefix| !sk.starts_with(prefix.as_str())));
        assert!(owner_prefixes(&Owner::from("ironman2"))
            .iter()
            .any(|prefix| sk.starts_with(prefix.as_str())));
    }
}
