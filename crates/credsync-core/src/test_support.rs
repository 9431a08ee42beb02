//! Record builders shared by unit tests.

use crate::models::{Origin, Record};

pub fn record(origin: Origin, index: usize, url: &str, username: &str, password: &str) -> Record {
    Record::new(format!("{}-{index}", origin.tag()), origin)
        .with_title(url)
        .with_url(url)
        .with_username(username)
        .with_password(password)
}

pub fn apple(index: usize, url: &str, username: &str, password: &str) -> Record {
    record(Origin::Apple, index, url, username, password)
}

pub fn google(index: usize, url: &str, username: &str, password: &str) -> Record {
    record(Origin::Google, index, url, username, password)
}
