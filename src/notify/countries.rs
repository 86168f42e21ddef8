//! Team flags

/// A national team known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub flag: &'static str,
}

impl Country {
    const fn new(name: &'static str, flag: &'static str) -> Self {
        Self { name, flag }
    }
}

const COUNTRIES: [Country; 32] = [
    Country::new("Argentina", "🇦🇷"),
    Country::new("Brazil", "🇧🇷"),
    Country::new("England", "🏴󠁧󠁢󠁥󠁮󠁧󠁿"),
    Country::new("France", "🇫🇷"),
    Country::new("Spain", "🇪🇸"),
    Country::new("Belgium", "🇧🇪"),
    Country::new("Portugal", "🇵🇹"),
    Country::new("Germany", "🇩🇪"),
    Country::new("Netherlands", "🇳🇱"),
    Country::new("Uruguay", "🇺🇾"),
    Country::new("Croatia", "🇭🇷"),
    Country::new("Denmark", "🇩🇰"),
    Country::new("Mexico", "🇲🇽"),
    Country::new("USA", "🇺🇸"),
    Country::new("Senegal", "🇸🇳"),
    Country::new("Wales", "🏴󠁧󠁢󠁷󠁬󠁳󠁿"),
    Country::new("Poland", "🇵🇱"),
    Country::new("Australia", "🇦🇺"),
    Country::new("Japan", "🇯🇵"),
    Country::new("Morocco", "🇲🇦"),
    Country::new("Switzerland", "🇨🇭"),
    Country::new("Ghana", "🇬🇭"),
    Country::new("Korea Republic", "🇰🇷"),
    Country::new("Cameroon", "🇨🇲"),
    Country::new("Serbia", "🇷🇸"),
    Country::new("Canada", "🇨🇦"),
    Country::new("Costa Rica", "🇨🇷"),
    Country::new("Tunisia", "🇹🇳"),
    Country::new("Saudi Arabia", "🇸🇦"),
    Country::new("Iran", "🇮🇷"),
    Country::new("Ecuador", "🇪🇨"),
    Country::new("Qatar", "🇶🇦"),
];

/// Looks up a team by the name shown on the ticketing site
pub fn lookup(name: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|country| country.name == name)
}
