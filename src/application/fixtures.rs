//! Known organization used to verify the builder.

use crate::domain::Person;

/// Canonical form of [`sample_org`].
pub const SAMPLE_EXPECTED: &str = "Kirk{Mark{Tom{Ben{David},Nick{Corey,Stacey{Julie,Tom}}}}}";

/// Name of the CEO in [`sample_org`].
pub const SAMPLE_CEO: &str = "Kirk";

/// Ten people, two of them named Tom, with fresh ids on every call.
///
/// ```text
/// Kirk
/// └── Mark
///     └── Tom
///         ├── Nick
///         │   ├── Stacey
///         │   │   ├── Tom
///         │   │   └── Julie
///         │   └── Corey
///         └── Ben
///             └── David
/// ```
pub fn sample_org() -> Vec<Person> {
    let kirk = Person::new("Kirk", None);
    let mark = Person::new("Mark", Some(&kirk));
    let tom1 = Person::new("Tom", Some(&mark));
    let nick = Person::new("Nick", Some(&tom1));
    let ben = Person::new("Ben", Some(&tom1));
    let david = Person::new("David", Some(&ben));
    let stacey = Person::new("Stacey", Some(&nick));
    let corey = Person::new("Corey", Some(&nick));
    let tom2 = Person::new("Tom", Some(&stacey));
    let julie = Person::new("Julie", Some(&stacey));

    vec![kirk, mark, tom1, nick, ben, david, stacey, corey, tom2, julie]
}
