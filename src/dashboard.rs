//! Business dashboard snapshot.
//!
//! Metrics are demo figures until a real analytics source exists; the
//! business name is the only live value. The rendered bullet list is what
//! the analysis prompt receives.

/// The numbers shown on the dashboard and summarized by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub business_name: String,
    pub visitors_today: u32,
    pub peak_time: String,
    pub most_viewed_page: String,
    pub top_pages: Vec<String>,
    pub upcoming_campaign: String,
    pub past_campaign: String,
    pub review_sentiment: String,
    pub latest_reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub text: String,
    pub stars: u8,
}

impl Review {
    /// Five-slot star rating, e.g. `⭐⭐⭐☆☆`.
    pub fn stars_display(&self) -> String {
        let filled = usize::from(self.stars.min(5));
        "⭐".repeat(filled) + &"☆".repeat(5 - filled)
    }
}

impl DashboardSnapshot {
    pub fn for_business(business_name: &str) -> Self {
        Self {
            business_name: business_name.trim().to_string(),
            visitors_today: 1234,
            peak_time: "2:15 PM".into(),
            most_viewed_page: "Services Page".into(),
            top_pages: vec![
                "Home Page".into(),
                "Services Page".into(),
                "About Page".into(),
            ],
            upcoming_campaign: "Summer Sale (Starts July 1st)".into(),
            past_campaign: "Spring Launch (Completed May 15th)".into(),
            review_sentiment: "Positive".into(),
            latest_reviews: vec![
                Review {
                    text: "Great service! Very happy.".into(),
                    stars: 5,
                },
                Review {
                    text: "The product was okay.".into(),
                    stars: 3,
                },
            ],
        }
    }

    /// Visitors with a thousands separator (`1,234`).
    pub fn visitors_display(&self) -> String {
        let digits = self.visitors_today.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Bullet list fed into the analysis prompt.
    pub fn render(&self) -> String {
        format!(
            "- Business Name: {}\n\
             - Today's Visitors: {}\n\
             - Peak Time: {}\n\
             - Most Viewed Page: {}\n\
             - Upcoming Campaign: {}\n\
             - Latest Review Sentiment: {}",
            self.business_name,
            self.visitors_display(),
            self.peak_time,
            self.most_viewed_page,
            self.upcoming_campaign,
            self.review_sentiment,
        )
    }
}
