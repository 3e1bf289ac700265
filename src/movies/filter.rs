/// Deny-list check run on a title before it is saved.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    phrases: Vec<String>,
}

impl ContentFilter {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// True when the title contains any deny phrase, ignoring case.
    pub fn is_rejected(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.phrases.iter().any(|p| title.contains(p.as_str()))
    }
}
