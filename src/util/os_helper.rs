/// Author used when the configuration does not name one.
pub fn get_name() -> String {
    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}

pub fn default_author(configured: Option<&str>) -> String {
    match configured {
        Some(author) if !author.is_empty() => author.to_string(),
        _ => get_name(),
    }
}
