use super::*;
use crate::net::types::ContentType;

#[test]
fn rating_label_formats_one_decimal() {
    assert_eq!(rating_label(Some(8.25)).as_deref(), Some("★ 8.2"));
    assert_eq!(rating_label(Some(7.0)).as_deref(), Some("★ 7.0"));
    assert_eq!(rating_label(None), None);
}

#[test]
fn content_link_points_at_details_route() {
    let dune = Content { id: 42, title: "Dune".to_owned(), ..Content::default() };
    assert_eq!(content_link(&dune), "/content/42/movie");

    let bebop = Content { id: 7, content_type: ContentType::Anime, ..Content::default() };
    assert_eq!(content_link(&bebop), "/content/7/anime");
}
