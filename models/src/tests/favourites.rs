use crate::{FavouriteChange, Favourites};

#[test]
fn given_text_with_blanks_and_repeats_when_parsed_then_keeps_unique_ids() {
    let favourites = Favourites::from_text("1\n\n  A35 \n1\n");

    assert_eq!(favourites.ids(), &["1".to_string(), "A35".to_string()]);
    assert_eq!(favourites.to_text(), "1\nA35");
}

#[test]
fn given_favourites_when_adding_and_removing_then_reports_change() {
    let mut favourites = Favourites::default();

    assert_eq!(favourites.add("A35"), FavouriteChange::Added);
    assert_eq!(favourites.add("a35"), FavouriteChange::AlreadyPresent);
    assert_eq!(favourites.remove("A35"), FavouriteChange::Removed);
    assert_eq!(favourites.remove("A35"), FavouriteChange::NotPresent);
    assert!(favourites.is_empty());
}
