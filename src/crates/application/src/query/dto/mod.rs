pub mod visible_album;
