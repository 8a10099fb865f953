//! Placeholder field tables, one enum per template slot

/// A placeholder field legal in some template slot
pub trait Field: Copy + Eq + std::fmt::Debug + 'static {
    /// Every legal field, in declaration order
    const ALL: &'static [Self];

    /// Name as written between `${` and `}`
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|field| field.name()).collect()
    }
}

macro_rules! fields {
    ($(#[$meta:meta])* $ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ty {
            $($variant),+
        }

        impl Field for $ty {
            const ALL: &'static [Self] = &[$($ty::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }
    };
}

fields! {
    /// Fields of the whole-tweet and footer templates
    TweetField {
        TweetUrl => "tweet.url",
        TweetId => "tweet.id",
        TweetText => "tweet.text",
        TweetDatetime => "tweet.datetime",
        UserName => "user.name",
        UserUsername => "user.username",
        UserUrl => "user.url",
        DateIso => "date.iso",
        DateYear => "date.year",
        DateMonth => "date.month",
        DateDay => "date.day",
        DateHours => "date.hours",
        DateMinutes => "date.minutes",
        DateSeconds => "date.seconds",
        DateTimestamp => "date.timestamp",
    }
}

fields! {
    TextField {
        Text => "text",
    }
}

fields! {
    UrlField {
        Text => "text",
        ShortUrl => "short_url",
        ExpandedUrl => "expanded_url",
        DecodedUrl => "decoded_url",
        Title => "title",
    }
}

fields! {
    HashtagField {
        Text => "text",
        Tag => "tag",
        Hashmoji => "hashmoji",
    }
}

fields! {
    CashtagField {
        Text => "text",
        Tag => "tag",
    }
}

fields! {
    MentionField {
        Text => "text",
        Username => "username",
        UserUrl => "user_url",
    }
}

fields! {
    PhotoField {
        Url => "url",
    }
}

fields! {
    VideoField {
        Thumbnail => "thumbnail",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_field_names() {
        assert_eq!(
            &TweetField::names()[..7],
            &[
                "tweet.url",
                "tweet.id",
                "tweet.text",
                "tweet.datetime",
                "user.name",
                "user.username",
                "user.url"
            ]
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(UrlField::from_name("decoded_url"), Some(UrlField::DecodedUrl));
        assert_eq!(UrlField::from_name("tag"), None);
        assert_eq!(MentionField::from_name("user_url"), Some(MentionField::UserUrl));
    }

    #[test]
    fn test_names_round_trip() {
        for field in HashtagField::ALL {
            assert_eq!(HashtagField::from_name(field.name()), Some(*field));
        }
    }
}
