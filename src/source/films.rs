//! Built-in demo option set.

use crate::model::{OptionSet, SelectOption};

const FILMS: &[(&str, &str)] = &[
    ("shawshank-1994", "The Shawshank Redemption"),
    ("godfather-1972", "The Godfather"),
    ("godfather-2-1974", "The Godfather: Part II"),
    ("dark-knight-2008", "The Dark Knight"),
    ("12-angry-men-1957", "12 Angry Men"),
    ("schindlers-list-1993", "Schindler's List"),
    ("rotk-2003", "The Lord of the Rings: The Return of the King"),
    ("pulp-fiction-1994", "Pulp Fiction"),
    ("good-bad-ugly-1966", "The Good, the Bad and the Ugly"),
    ("fight-club-1999", "Fight Club"),
    ("fotr-2001", "The Lord of the Rings: The Fellowship of the Ring"),
    ("forrest-gump-1994", "Forrest Gump"),
    ("empire-strikes-back-1980", "Star Wars: Episode V - The Empire Strikes Back"),
    ("inception-2010", "Inception"),
    ("two-towers-2002", "The Lord of the Rings: The Two Towers"),
    ("cuckoos-nest-1975", "One Flew Over the Cuckoo's Nest"),
    ("goodfellas-1990", "Goodfellas"),
    ("matrix-1999", "The Matrix"),
    ("seven-samurai-1954", "Seven Samurai"),
    ("new-hope-1977", "Star Wars: Episode IV - A New Hope"),
    ("city-of-god-2002", "City of God"),
    ("se7en-1995", "Se7en"),
    ("silence-of-the-lambs-1991", "The Silence of the Lambs"),
    ("its-a-wonderful-life-1946", "It's a Wonderful Life"),
    ("life-is-beautiful-1997", "Life Is Beautiful"),
    ("usual-suspects-1995", "The Usual Suspects"),
    ("leon-1994", "Léon: The Professional"),
    ("spirited-away-2001", "Spirited Away"),
    ("saving-private-ryan-1998", "Saving Private Ryan"),
    ("once-upon-a-time-in-the-west-1968", "Once Upon a Time in the West"),
];

/// A short list of well-known films, in ranking order.
pub fn top_films() -> OptionSet {
    FILMS
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}
