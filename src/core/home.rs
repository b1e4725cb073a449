//! Home screen content: time-of-day greeting and the news feed.

pub struct NewsItem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const NEWS: &[NewsItem] = &[
    NewsItem {
        id: "1",
        title: "New Subjects Released!",
        description: "Explore the latest subjects added to your curriculum.",
    },
    NewsItem {
        id: "2",
        title: "App Update v2.0",
        description: "We've made big changes to the app. Check out what's new in version 2.0.",
    },
];

/// Greeting for a local hour (0-23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}
