use strum_macros::{Display, EnumString};

/// Purchase state of a grocery item. Items always start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Purchased,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_store_status_as_lowercase_text() {
        assert_eq!(ItemStatus::Pending.to_string(), "pending");
        assert_eq!(ItemStatus::Purchased.to_string(), "purchased");
    }

    #[test]
    fn should_parse_status_from_text() {
        assert_eq!("purchased".parse::<ItemStatus>().unwrap(), ItemStatus::Purchased);
        assert_eq!("pending".parse::<ItemStatus>().unwrap(), ItemStatus::Pending);
        assert!("bought".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn should_default_to_pending() {
        assert_eq!(ItemStatus::default(), ItemStatus::Pending);
    }
}
